use crate::rules::RuleBook;
use crate::types::{Category, CategoryScores};

/// Infers a page's category from its text alone.
///
/// Every indicator contributes `matches * weight` to its category, where
/// `matches` counts non-overlapping case-insensitive hits in the lower-cased
/// text. The highest score wins; equal top scores go to the category listed
/// first in [`Category::ALL`]. A page that hits no indicator is unknown.
pub struct DocumentClassifier<'a> {
    book: &'a RuleBook,
}

impl Default for DocumentClassifier<'static> {
    fn default() -> Self {
        Self::new(RuleBook::builtin())
    }
}

impl<'a> DocumentClassifier<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self { book }
    }

    pub fn scores(&self, text: &str) -> CategoryScores {
        let lowered = text.to_lowercase();
        let mut scores = CategoryScores::default();

        for (category, indicators) in self.book.indicators.iter() {
            for indicator in indicators {
                let matches = indicator.regex.find_iter(&lowered).count();
                scores.add(category, matches as f64 * indicator.weight);
            }
        }

        scores
    }

    pub fn infer(&self, text: &str) -> Option<Category> {
        self.classify(text).0
    }

    /// Inferred category together with the scores behind it.
    pub fn classify(&self, text: &str) -> (Option<Category>, CategoryScores) {
        let scores = self.scores(text);
        let inferred = scores.winner();
        tracing::debug!(
            inferred = inferred.map(|c| c.as_str()).unwrap_or("unknown"),
            tutorial = scores.tutorial,
            how_to = scores.how_to,
            reference = scores.reference,
            explanation = scores.explanation,
            "classified document"
        );
        (inferred, scores)
    }
}
