use super::book::{count_code_blocks, CompiledStructural};
use crate::types::{Concern, Finding, Severity};

pub fn check_structure(rules: &[CompiledStructural], text: &str) -> Vec<Finding> {
    rules
        .iter()
        .filter_map(|rule| match rule {
            CompiledStructural::MaxCodeBlocks {
                limit,
                message,
                suggestion,
            } => {
                let blocks = count_code_blocks(text);
                (blocks > *limit).then(|| {
                    tracing::trace!(blocks, limit, "code block limit exceeded");
                    Finding::new(Severity::Warning, Concern::Structure, message).with_suggestion(suggestion)
                })
            }
            CompiledStructural::ForbidPattern {
                regex,
                severity,
                message,
                suggestion,
            } => regex
                .is_match(text)
                .then(|| Finding::new(*severity, Concern::Structure, message).with_suggestion(suggestion)),
            CompiledStructural::RequirePattern {
                regex,
                severity,
                message,
                suggestion,
            } => (!regex.is_match(text))
                .then(|| Finding::new(*severity, Concern::Structure, message).with_suggestion(suggestion)),
        })
        .collect()
}
