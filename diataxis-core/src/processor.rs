use crate::classifier::DocumentClassifier;
use crate::discovery::{discover, Discovery};
use crate::error::{LintError, Result};
use crate::metadata;
use crate::rules::frontmatter::declared_category;
use crate::rules::{RuleBook, RuleEngine};
use crate::types::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs one analysis pass per document: read frontmatter, infer the
/// category, evaluate the declared category's rules, then flag a
/// declared/inferred mismatch.
pub struct DocumentProcessor<'a> {
    classifier: DocumentClassifier<'a>,
    rule_engine: RuleEngine<'a>,
}

impl Default for DocumentProcessor<'static> {
    fn default() -> Self {
        Self::new(RuleBook::builtin())
    }
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(book: &'a RuleBook) -> Self {
        Self {
            classifier: DocumentClassifier::new(book),
            rule_engine: RuleEngine::new(book),
        }
    }

    pub fn book(&self) -> &'a RuleBook {
        self.rule_engine.book()
    }

    /// Analyze text already in memory. Never fails: every problem with the
    /// text is reported as a finding.
    pub fn analyze(&self, identifier: &str, text: &str) -> AnalysisResult {
        let _span = tracing::debug_span!("analyze", document = identifier).entered();
        let mut result = AnalysisResult::new(identifier);

        let read = metadata::read(text);
        let (declared, declared_raw) = declared_category(read.metadata.as_ref());
        result.declared = declared;
        result.declared_raw = declared_raw;

        let (inferred, scores) = self.classifier.classify(text);
        result.inferred = inferred;
        result.scores = scores;

        result.findings = self
            .rule_engine
            .evaluate_with_metadata(text, read.metadata.as_ref(), declared);

        if let (Some(declared), Some(inferred)) = (result.declared, result.inferred) {
            if declared != inferred {
                result.findings.push(
                    Finding::new(
                        Severity::Warning,
                        Concern::Frontmatter,
                        format!("Type mismatch: declared as '{declared}' but content suggests '{inferred}'"),
                    )
                    .with_suggestion(format!("Review content or update diataxis_type to '{inferred}'")),
                );
            }
        }

        result
    }

    pub fn analyze_document(&self, document: &Document) -> AnalysisResult {
        self.analyze(document.identifier(), document.text())
    }

    /// Read and analyze one file. A read or decoding failure becomes a single
    /// `file` error finding on the result.
    pub fn analyze_path(&self, path: &Path) -> AnalysisResult {
        match Document::read(path) {
            Ok(document) => self.analyze_document(&document),
            Err(err) => {
                let reason = match &err {
                    LintError::Io { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                unreadable(path, &reason)
            }
        }
    }

    /// Analyze every path, reported in identifier order regardless of input order.
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Vec<AnalysisResult> {
        self.analyze_batch(paths, Vec::new())
    }

    /// Analyze discovered documents. Entries discovery could not visit are
    /// reported as `file` errors alongside them.
    pub fn analyze_discovery(&self, discovery: &Discovery) -> Vec<AnalysisResult> {
        let failed = discovery
            .failures
            .iter()
            .map(|failure| unreadable(&failure.path, &failure.reason))
            .collect();
        self.analyze_batch(&discovery.documents, failed)
    }

    fn analyze_batch(&self, paths: &[PathBuf], mut results: Vec<AnalysisResult>) -> Vec<AnalysisResult> {
        let started = Instant::now();
        results.extend(paths.iter().map(|path| self.analyze_path(path)));
        results.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        tracing::info!(
            documents = results.len(),
            with_errors = results.iter().filter(|r| r.has_errors()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        results
    }

    /// Discover documents under `root` (or take `root` itself if it is a file) and analyze them.
    pub fn analyze_root(&self, root: &Path, extensions: &[String]) -> Result<Vec<AnalysisResult>> {
        let discovery = discover(root, extensions)?;
        Ok(self.analyze_discovery(&discovery))
    }

    /// Wrap results into a report stamped with this processor's rule book.
    pub fn report(&self, results: Vec<AnalysisResult>) -> BatchReport {
        BatchReport::new(results, self.book().fingerprint())
    }
}

fn unreadable(path: &Path, reason: &str) -> AnalysisResult {
    let identifier = path.display().to_string();
    tracing::warn!(path = %identifier, error = %reason, "could not read document");
    let mut result = AnalysisResult::new(identifier);
    result.findings.push(Finding::new(
        Severity::Error,
        Concern::File,
        format!("Error reading file: {reason}"),
    ));
    result
}
