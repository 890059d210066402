use crate::metadata::Metadata;
use crate::types::{Category, Concern, Finding, Severity};

/// Frontmatter key that declares the page's category.
pub const CATEGORY_KEY: &str = "diataxis_type";

/// Keys every page must carry.
pub const REQUIRED_FIELDS: [&str; 2] = ["title", "description"];

/// Declared category as written and, when it names one of the four
/// categories, as parsed. An invalid value is never coerced.
pub fn declared_category(metadata: Option<&Metadata>) -> (Option<Category>, Option<String>) {
    let raw = metadata.and_then(|m| m.get(CATEGORY_KEY)).map(str::to_string);
    let parsed = raw.as_deref().and_then(|value| value.parse().ok());
    (parsed, raw)
}

pub fn check_frontmatter(metadata: Option<&Metadata>) -> Vec<Finding> {
    let Some(metadata) = metadata else {
        return vec![Finding::new(Severity::Error, Concern::Frontmatter, "Missing YAML frontmatter")
            .with_suggestion("Add frontmatter with at least: title, description, diataxis_type")];
    };

    let mut findings = Vec::new();

    for field in REQUIRED_FIELDS {
        if !metadata.contains_key(field) {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Concern::Frontmatter,
                    format!("Missing required field: {field}"),
                )
                .with_suggestion(format!("Add '{field}: <value>' to frontmatter")),
            );
        }
    }

    match metadata.get(CATEGORY_KEY) {
        None => findings.push(
            Finding::new(Severity::Warning, Concern::Frontmatter, "Missing diataxis_type field")
                .with_suggestion("Add 'diataxis_type: tutorial|how-to|reference|explanation'"),
        ),
        Some(value) if value.parse::<Category>().is_err() => findings.push(
            Finding::new(
                Severity::Error,
                Concern::Frontmatter,
                format!("Invalid diataxis_type: {value}"),
            )
            .with_suggestion("Use one of: tutorial, how-to, reference, explanation"),
        ),
        Some(_) => {}
    }

    findings
}
