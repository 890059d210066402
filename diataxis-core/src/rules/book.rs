use crate::config::{Indicator, LintConfig, PhraseRule, RuleSetConfig, StructuralRule};
use crate::error::{LintError, Result};
use crate::types::{Category, PerCategory, Severity};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static BUILTIN: LazyLock<RuleBook> = LazyLock::new(|| {
    RuleBook::compile(&LintConfig::default()).expect("built-in rule tables must compile")
});

/// Fenced code block, non-greedy so adjacent blocks count separately.
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[\s\S]+?```").unwrap());

fn compile_pattern(category: Category, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| LintError::InvalidPattern {
            category,
            pattern: pattern.to_string(),
            source,
        })
}

#[derive(Debug, Clone)]
pub struct CompiledIndicator {
    pub regex: Regex,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct CompiledPhrase {
    pub regex: Regex,
    pub rationale: String,
    /// Stored lower-cased
    unless_followed_by: Option<String>,
}

impl CompiledPhrase {
    fn compile(category: Category, rule: &PhraseRule) -> Result<Self> {
        Ok(Self {
            regex: compile_pattern(category, &rule.pattern)?,
            rationale: rule.rationale.clone(),
            unless_followed_by: rule.unless_followed_by.as_ref().map(|s| s.to_lowercase()),
        })
    }

    /// First match in `haystack` that is not excused by `unless_followed_by`.
    pub fn find<'t>(&self, haystack: &'t str) -> Option<&'t str> {
        self.regex
            .find_iter(haystack)
            .find(|m| !self.is_excused(&haystack[m.end()..]))
            .map(|m| m.as_str())
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.find(haystack).is_some()
    }

    fn is_excused(&self, rest: &str) -> bool {
        match &self.unless_followed_by {
            Some(needle) => rest
                .chars()
                .flat_map(char::to_lowercase)
                .take(needle.chars().count())
                .eq(needle.chars()),
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CompiledStructural {
    MaxCodeBlocks {
        limit: usize,
        message: String,
        suggestion: String,
    },
    ForbidPattern {
        regex: Regex,
        severity: Severity,
        message: String,
        suggestion: String,
    },
    RequirePattern {
        regex: Regex,
        severity: Severity,
        message: String,
        suggestion: String,
    },
}

impl CompiledStructural {
    fn compile(category: Category, rule: &StructuralRule) -> Result<Self> {
        Ok(match rule {
            StructuralRule::MaxCodeBlocks {
                limit,
                message,
                suggestion,
            } => Self::MaxCodeBlocks {
                limit: *limit,
                message: message.clone(),
                suggestion: suggestion.clone(),
            },
            StructuralRule::ForbidPattern {
                pattern,
                severity,
                message,
                suggestion,
            } => Self::ForbidPattern {
                regex: compile_pattern(category, pattern)?,
                severity: *severity,
                message: message.clone(),
                suggestion: suggestion.clone(),
            },
            StructuralRule::RequirePattern {
                pattern,
                severity,
                message,
                suggestion,
            } => Self::RequirePattern {
                regex: compile_pattern(category, pattern)?,
                severity: *severity,
                message: message.clone(),
                suggestion: suggestion.clone(),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    pub forbidden_phrases: Vec<CompiledPhrase>,
    pub required_elements: Vec<CompiledPhrase>,
    pub structural: Vec<CompiledStructural>,
}

impl CompiledRuleSet {
    fn compile(category: Category, rules: &RuleSetConfig) -> Result<Self> {
        Ok(Self {
            forbidden_phrases: rules
                .forbidden_phrases
                .iter()
                .map(|rule| CompiledPhrase::compile(category, rule))
                .collect::<Result<_>>()?,
            required_elements: rules
                .required_elements
                .iter()
                .map(|rule| CompiledPhrase::compile(category, rule))
                .collect::<Result<_>>()?,
            structural: rules
                .structural
                .iter()
                .map(|rule| CompiledStructural::compile(category, rule))
                .collect::<Result<_>>()?,
        })
    }
}

/// A [`LintConfig`] with every pattern compiled, case-insensitive.
/// Read-only once built, so one instance serves a whole batch.
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub indicators: PerCategory<Vec<CompiledIndicator>>,
    pub rules: PerCategory<CompiledRuleSet>,
    fingerprint: String,
}

impl RuleBook {
    pub fn compile(config: &LintConfig) -> Result<Self> {
        let indicators = config.indicators.try_map(|category, list: &Vec<Indicator>| {
            list.iter()
                .map(|indicator| {
                    Ok(CompiledIndicator {
                        regex: compile_pattern(category, &indicator.pattern)?,
                        weight: indicator.weight,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })?;
        let rules = config.rules.try_map(CompiledRuleSet::compile)?;
        let fingerprint = config.fingerprint()?;

        tracing::debug!(fingerprint = %fingerprint, "compiled rule book");
        Ok(Self {
            indicators,
            rules,
            fingerprint,
        })
    }

    /// Shared rule book built from the default tables on first use.
    pub fn builtin() -> &'static RuleBook {
        &BUILTIN
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn rules_for(&self, category: Category) -> &CompiledRuleSet {
        self.rules.get(category)
    }
}

pub fn count_code_blocks(text: &str) -> usize {
    CODE_BLOCK.find_iter(text).count()
}
