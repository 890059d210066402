use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::LintError;

// ===== CATEGORY =====

/// The four Diataxis content kinds. Closed on purpose: an unrecognized value
/// in frontmatter is reported as a finding, never mapped onto a fifth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "tutorial")]
    Tutorial,
    #[serde(rename = "how-to")]
    HowTo,
    #[serde(rename = "reference")]
    Reference,
    #[serde(rename = "explanation")]
    Explanation,
}

impl Category {
    /// Fixed enumeration order. Inference ties resolve to the earliest entry.
    pub const ALL: [Category; 4] = [
        Category::Tutorial,
        Category::HowTo,
        Category::Reference,
        Category::Explanation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tutorial => "tutorial",
            Category::HowTo => "how-to",
            Category::Reference => "reference",
            Category::Explanation => "explanation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LintError;

    /// Exact, case-sensitive match against the four names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| LintError::UnknownCategory(s.to_string()))
    }
}

/// One value per category. Lookup is an exhaustive match, so adding a fifth
/// category is a compile error everywhere a table is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerCategory<T> {
    pub tutorial: T,
    #[serde(rename = "how-to")]
    pub how_to: T,
    pub reference: T,
    pub explanation: T,
}

impl<T> PerCategory<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            tutorial: f(Category::Tutorial),
            how_to: f(Category::HowTo),
            reference: f(Category::Reference),
            explanation: f(Category::Explanation),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Tutorial => &self.tutorial,
            Category::HowTo => &self.how_to,
            Category::Reference => &self.reference,
            Category::Explanation => &self.explanation,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Tutorial => &mut self.tutorial,
            Category::HowTo => &mut self.how_to,
            Category::Reference => &mut self.reference,
            Category::Explanation => &mut self.explanation,
        }
    }

    /// Entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |category| (category, self.get(category)))
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(Category, &T) -> Result<U, E>) -> Result<PerCategory<U>, E> {
        Ok(PerCategory {
            tutorial: f(Category::Tutorial, &self.tutorial)?,
            how_to: f(Category::HowTo, &self.how_to)?,
            reference: f(Category::Reference, &self.reference)?,
            explanation: f(Category::Explanation, &self.explanation)?,
        })
    }
}

// ===== FINDINGS =====

/// Ordered so that `Error > Warning > Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What part of a document a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concern {
    Frontmatter,
    Language,
    Structure,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based line number; 1 when the finding is not tied to a line.
    pub line: usize,
    pub severity: Severity,
    pub concern: Concern,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(severity: Severity, concern: Concern, message: impl Into<String>) -> Self {
        Self {
            line: 1,
            severity,
            concern,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

// ===== DOCUMENTS =====

/// Input unit: an identifier and its full text, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    identifier: String,
    text: String,
}

impl Document {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }

    /// Load a UTF-8 file. The identifier is the path as given.
    pub fn read(path: &Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// ===== PER-DOCUMENT RESULT =====

/// Raw inference scores, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub tutorial: f64,
    #[serde(rename = "how-to")]
    pub how_to: f64,
    pub reference: f64,
    pub explanation: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Tutorial => self.tutorial,
            Category::HowTo => self.how_to,
            Category::Reference => self.reference,
            Category::Explanation => self.explanation,
        }
    }

    pub fn add(&mut self, category: Category, amount: f64) {
        let slot = match category {
            Category::Tutorial => &mut self.tutorial,
            Category::HowTo => &mut self.how_to,
            Category::Reference => &mut self.reference,
            Category::Explanation => &mut self.explanation,
        };
        *slot += amount;
    }

    /// Highest-scoring category, earliest in enumeration order on ties.
    /// `None` when nothing scored above zero.
    pub fn winner(&self) -> Option<Category> {
        let mut best: Option<(Category, f64)> = None;
        for category in Category::ALL {
            let score = self.get(category);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((category, score)),
            }
        }
        best.filter(|(_, score)| *score > 0.0).map(|(category, _)| category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Path or other handle supplied by the caller.
    pub identifier: String,
    /// Declared category, only when the frontmatter value is one of the four names.
    pub declared: Option<Category>,
    /// The frontmatter value as written, valid or not.
    pub declared_raw: Option<String>,
    pub inferred: Option<Category>,
    pub scores: CategoryScores,
    pub findings: Vec<Finding>,
}

impl AnalysisResult {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            declared: None,
            declared_raw: None,
            inferred: None,
            scores: CategoryScores::default(),
            findings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn category_mismatch(&self) -> bool {
        matches!((self.declared, self.inferred), (Some(d), Some(i)) if d != i)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Drop findings below `min`. Order of the survivors is preserved.
    pub fn retain_at_least(&mut self, min: Severity) {
        self.findings.retain(|f| f.severity >= min);
    }
}

// ===== BATCH =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub files_with_findings: usize,
    pub files_with_errors: usize,
    pub total_findings: usize,
    pub category_mismatches: usize,
    pub by_severity: SeverityCounts,
    /// Valid declared categories only, keyed by name.
    pub category_distribution: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self {
            total_files: results.len(),
            ..Self::default()
        };

        for result in results {
            if !result.findings.is_empty() {
                summary.files_with_findings += 1;
            }
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
            if result.category_mismatch() {
                summary.category_mismatches += 1;
            }
            summary.total_findings += result.findings.len();
            summary.by_severity.errors += result.count(Severity::Error);
            summary.by_severity.warnings += result.count(Severity::Warning);
            summary.by_severity.infos += result.count(Severity::Info);

            if let Some(declared) = result.declared {
                *summary
                    .category_distribution
                    .entry(declared.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }

        summary
    }
}

/// Serialization-ready output of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the rule configuration used for this run.
    pub ruleset_fingerprint: String,
    pub results: Vec<AnalysisResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(results: Vec<AnalysisResult>, ruleset_fingerprint: impl Into<String>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            ruleset_fingerprint: ruleset_fingerprint.into(),
            results,
            summary,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(AnalysisResult::has_errors)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
