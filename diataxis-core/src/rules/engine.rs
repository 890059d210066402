use super::book::RuleBook;
use super::frontmatter::check_frontmatter;
use super::language::{check_forbidden_phrases, check_required_elements};
use super::structure::check_structure;
use crate::metadata::{self, Metadata};
use crate::types::{Category, Finding};

/// Applies the declared category's rules to a page.
///
/// Steps always run in the same order and append to one list:
/// frontmatter completeness, forbidden phrases, required elements,
/// structural rules. Phrase and structure steps need a valid declared
/// category; without one only the frontmatter step contributes.
pub struct RuleEngine<'a> {
    book: &'a RuleBook,
}

impl Default for RuleEngine<'static> {
    fn default() -> Self {
        Self::new(RuleBook::builtin())
    }
}

impl<'a> RuleEngine<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &'a RuleBook {
        self.book
    }

    /// Reads the frontmatter from `text` itself.
    pub fn evaluate(&self, text: &str, declared: Option<Category>) -> Vec<Finding> {
        let read = metadata::read(text);
        self.evaluate_with_metadata(text, read.metadata.as_ref(), declared)
    }

    /// Same as [`RuleEngine::evaluate`] with the frontmatter already read.
    pub fn evaluate_with_metadata(
        &self,
        text: &str,
        metadata: Option<&Metadata>,
        declared: Option<Category>,
    ) -> Vec<Finding> {
        let mut findings = check_frontmatter(metadata);
        tracing::debug!(count = findings.len(), "frontmatter checks done");

        let Some(category) = declared else {
            return findings;
        };
        let rules = self.book.rules_for(category);

        let phrases = check_forbidden_phrases(category, rules, text);
        tracing::debug!(%category, count = phrases.len(), "forbidden phrase scan done");
        findings.extend(phrases);

        if let Some(missing) = check_required_elements(category, rules, text) {
            tracing::debug!(%category, "no required language pattern found");
            findings.push(missing);
        }

        let structure = check_structure(&rules.structural, text);
        tracing::debug!(%category, count = structure.len(), "structural checks done");
        findings.extend(structure);

        findings
    }
}
