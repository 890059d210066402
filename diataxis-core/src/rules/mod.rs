// Rule evaluation for declared categories. Implementations live in:
// - book.rs: compiled pattern tables shared by the classifier and the checks
// - frontmatter.rs: metadata completeness
// - language.rs: forbidden phrases and required elements
// - structure.rs: whole-document structural rules
// - engine.rs: RuleEngine, runs the checks in order

pub mod book;
pub mod engine;
pub mod frontmatter;
pub mod language;
pub mod structure;

pub use book::RuleBook;
pub use engine::RuleEngine;
