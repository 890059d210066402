use crate::error::{LintError, Result};
use crate::types::{Category, PerCategory, Severity};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

// Default value functions for serde
fn default_weight() -> f64 {
    1.0
}

fn default_info() -> Severity {
    Severity::Info
}

fn default_warning() -> Severity {
    Severity::Warning
}

/// Rule tables for the linter. Loaded once at startup and compiled into a
/// [`crate::rules::RuleBook`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Weighted patterns used to infer a page's category from its text
    #[serde(default = "default_indicators")]
    pub indicators: PerCategory<Vec<Indicator>>,
    /// Phrase and structure rules applied to the declared category
    #[serde(default = "default_rules")]
    pub rules: PerCategory<RuleSetConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Indicator {
    pub pattern: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    /// Any line matching one of these is a warning
    #[serde(default)]
    pub forbidden_phrases: Vec<PhraseRule>,
    /// At least one of these should appear somewhere in the page
    #[serde(default)]
    pub required_elements: Vec<PhraseRule>,
    #[serde(default)]
    pub structural: Vec<StructuralRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhraseRule {
    pub pattern: String,
    pub rationale: String,
    /// Ignore a match immediately followed by this text (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless_followed_by: Option<String>,
}

/// Whole-document checks that are not simple phrase matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralRule {
    /// Warn when the page has more fenced code blocks than `limit`
    MaxCodeBlocks {
        limit: usize,
        message: String,
        suggestion: String,
    },
    /// Report when the pattern matches anywhere
    ForbidPattern {
        pattern: String,
        #[serde(default = "default_warning")]
        severity: Severity,
        message: String,
        suggestion: String,
    },
    /// Report when the pattern matches nowhere
    RequirePattern {
        pattern: String,
        #[serde(default = "default_info")]
        severity: Severity,
        message: String,
        suggestion: String,
    },
}

fn indicators(patterns: &[&str]) -> Vec<Indicator> {
    patterns
        .iter()
        .map(|pattern| Indicator {
            pattern: pattern.to_string(),
            weight: default_weight(),
        })
        .collect()
}

fn phrase(pattern: &str, rationale: &str) -> PhraseRule {
    PhraseRule {
        pattern: pattern.to_string(),
        rationale: rationale.to_string(),
        unless_followed_by: None,
    }
}

fn default_indicators() -> PerCategory<Vec<Indicator>> {
    PerCategory {
        tutorial: indicators(&[
            r"in this tutorial",
            r"you will (?:learn|build|create)",
            r"by the end of this",
            r"step \d+",
            r"let's (?:start|begin|create)",
        ]),
        how_to: indicators(&[
            r"this guide shows",
            r"to (?:configure|enable|set up)",
            r"prerequisites?:",
            r"(?:^|\n)## Prerequisites",
            r"follow these steps",
        ]),
        reference: indicators(&[
            r"(?:^|\n)## (?:Options|Parameters|Properties|Methods)",
            r"\| .+ \| .+ \|", // tables
            r"returns?:",
            r"parameters?:",
            r"this (?:page|section) describes",
        ]),
        explanation: indicators(&[
            r"why (?:does|is|should)",
            r"because",
            r"the reason",
            r"how .* works?",
            r"understanding",
        ]),
    }
}

/// Built-in structural checks. Tutorials have none.
pub fn default_structural_rules(category: Category) -> Vec<StructuralRule> {
    match category {
        Category::Tutorial => vec![],
        Category::HowTo => vec![StructuralRule::RequirePattern {
            pattern: r"prerequisite|before you begin|you need".to_string(),
            severity: Severity::Info,
            message: "How-to guide missing prerequisites section".to_string(),
            suggestion: "Add a prerequisites section to set expectations".to_string(),
        }],
        Category::Reference => vec![StructuralRule::ForbidPattern {
            pattern: r"(?:step \d+|first,|then,|finally,)".to_string(),
            severity: Severity::Warning,
            message: "Reference doc has step-by-step instructions".to_string(),
            suggestion: "Reference docs should be organized for lookup, not sequential reading"
                .to_string(),
        }],
        Category::Explanation => vec![StructuralRule::MaxCodeBlocks {
            limit: 2,
            message: "Explanation has many code blocks - consider moving to how-to".to_string(),
            suggestion: "Explanations should focus on concepts, not procedures".to_string(),
        }],
    }
}

fn default_rules() -> PerCategory<RuleSetConfig> {
    let mut rules = PerCategory {
        tutorial: RuleSetConfig {
            forbidden_phrases: vec![
                phrase(
                    r"\b(?:you can|you may|optionally|alternatively)\b",
                    "Tutorials should be prescriptive, not suggestive",
                ),
                phrase(r"\b(?:if you want to|you might)\b", "Tutorials guide, not offer choices"),
                phrase(r"\bconsider\b", "Tutorials direct, not suggest options"),
                phrase(r"\bvarious ways\b", "Tutorials show one clear path"),
            ],
            required_elements: vec![phrase(
                r"(?:you will|we will|let's)",
                "Tutorials need learning objectives",
            )],
            structural: vec![],
        },
        how_to: RuleSetConfig {
            forbidden_phrases: vec![
                phrase(
                    r"\b(?:let's|we will learn|you will learn)\b",
                    "How-tos are task-focused, not learning-focused",
                ),
                phrase(
                    r"\b(?:understand|learn about|concept)\b",
                    "How-tos solve problems, not explain concepts",
                ),
                PhraseRule {
                    unless_followed_by: Some(" not".to_string()),
                    ..phrase(r"\bwhy\b", "How-tos focus on how, not why")
                },
                phrase(
                    r"\b(?:first|then|next|finally)\b.*\b(?:first|then|next|finally)\b",
                    "Too tutorial-like with sequential steps",
                ),
            ],
            required_elements: vec![phrase(
                r"(?:configure|set up|enable|create|add|remove)",
                "How-tos need action verbs",
            )],
            structural: vec![],
        },
        reference: RuleSetConfig {
            forbidden_phrases: vec![
                phrase(
                    r"\b(?:you should|we recommend|best practice)\b",
                    "Reference docs are neutral, not prescriptive",
                ),
                phrase(r"\b(?:step 1|step 2|first|then|next)\b", "Reference docs don't have steps"),
                phrase(
                    r"\b(?:tutorial|learn|how to)\b",
                    "Reference docs are lookup, not instructional",
                ),
            ],
            required_elements: vec![phrase(
                r"(?:specifies|defines|contains|includes|lists)",
                "Reference docs need factual language",
            )],
            structural: vec![],
        },
        explanation: RuleSetConfig {
            forbidden_phrases: vec![
                phrase(
                    r"\b(?:step 1|step 2|configure|enable|create)\b",
                    "Explanations discuss concepts, not procedures",
                ),
                phrase(r"\b(?:you should|you must|required)\b", "Explanations inform, not instruct"),
                phrase(r"\bcurl -X\b", "Explanations explain, don't show commands"),
            ],
            required_elements: vec![phrase(
                r"(?:because|why|reason|how .* works)",
                "Explanations need conceptual framing",
            )],
            structural: vec![],
        },
    };

    for category in Category::ALL {
        rules.get_mut(category).structural = default_structural_rules(category);
    }
    rules
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            indicators: default_indicators(),
            rules: default_rules(),
        }
    }
}

impl LintConfig {
    /// Parse a YAML configuration. Omitted top-level sections keep the built-in tables.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded lint configuration");
        Ok(config)
    }

    /// Load `path` if given, otherwise the built-in tables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// SHA-256 over the canonical JSON form of the tables.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(format!("{:x}", hasher.finalize()))
    }
}
