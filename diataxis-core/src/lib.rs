// Diataxis Lint Core Library
//
// Classifies documentation pages as tutorial, how-to, reference or
// explanation and reports wording and structure that break the declared
// category's conventions.

pub mod classifier;
pub mod config;
pub mod discovery;
pub mod error;
pub mod metadata;
pub mod processor;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use classifier::DocumentClassifier;
pub use config::LintConfig;
pub use discovery::{discover, Discovery, DiscoveryFailure, DEFAULT_EXTENSIONS};
pub use error::{LintError, Result};
pub use processor::DocumentProcessor;
pub use rules::{RuleBook, RuleEngine};
pub use types::*;
