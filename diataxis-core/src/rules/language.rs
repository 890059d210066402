use super::book::CompiledRuleSet;
use crate::types::{Category, Concern, Finding, Severity};

/// One warning per (pattern, matching line). Lines are numbered from 1 over
/// the full text, frontmatter included, so numbers line up with the file.
pub fn check_forbidden_phrases(category: Category, rules: &CompiledRuleSet, text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for phrase in &rules.forbidden_phrases {
        for (index, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(found) = phrase.find(line) {
                findings.push(
                    Finding::new(
                        Severity::Warning,
                        Concern::Language,
                        format!("Anti-pattern detected in {category}: {}", phrase.rationale),
                    )
                    .at_line(index + 1)
                    .with_suggestion(format!("Found: {found}")),
                );
            }
        }
    }

    findings
}

/// At most one info finding: none of the required patterns appear anywhere.
pub fn check_required_elements(category: Category, rules: &CompiledRuleSet, text: &str) -> Option<Finding> {
    let first = rules.required_elements.first()?;

    if rules.required_elements.iter().any(|phrase| phrase.is_match(text)) {
        return None;
    }

    Some(
        Finding::new(
            Severity::Info,
            Concern::Language,
            format!("Missing typical {category} language patterns"),
        )
        .with_suggestion(first.rationale.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleBook;

    fn rules(category: Category) -> &'static CompiledRuleSet {
        RuleBook::builtin().rules_for(category)
    }

    #[test]
    fn one_finding_per_matching_line() {
        let text = "You can do this.\nplain line\nyou can also\nAnd YOU CAN too";
        let findings = check_forbidden_phrases(Category::Tutorial, rules(Category::Tutorial), text);
        let lines: Vec<_> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert_eq!(findings[0].suggestion.as_deref(), Some("Found: You can"));
        assert_eq!(
            findings[0].message,
            "Anti-pattern detected in tutorial: Tutorials should be prescriptive, not suggestive"
        );
    }

    #[test]
    fn repeated_phrase_on_one_line_counts_once() {
        let findings = check_forbidden_phrases(
            Category::Tutorial,
            rules(Category::Tutorial),
            "you can, you can, you can",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn line_matching_two_patterns_yields_two_findings() {
        let findings = check_forbidden_phrases(
            Category::Tutorial,
            rules(Category::Tutorial),
            "Optionally, consider the alternative.",
        );
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.line == 1));
    }

    #[test]
    fn findings_ordered_by_pattern_then_line() {
        let text = "consider this\nyou may\n";
        let findings = check_forbidden_phrases(Category::Tutorial, rules(Category::Tutorial), text);
        let order: Vec<_> = findings.iter().map(|f| (f.line, f.suggestion.clone().unwrap())).collect();
        assert_eq!(
            order,
            vec![(2, "Found: you may".to_string()), (1, "Found: consider".to_string())]
        );
    }

    #[test]
    fn how_to_why_not_is_allowed() {
        let findings = check_forbidden_phrases(Category::HowTo, rules(Category::HowTo), "Why not skip it?");
        assert!(findings.is_empty());
    }

    #[test]
    fn word_boundaries_are_respected() {
        let findings = check_forbidden_phrases(
            Category::Tutorial,
            rules(Category::Tutorial),
            "reconsidered every consideration",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn required_element_satisfied_by_substring() {
        assert_eq!(
            check_required_elements(Category::HowTo, rules(Category::HowTo), "Reconfigured the server"),
            None
        );
        assert_eq!(
            check_required_elements(Category::HowTo, rules(Category::HowTo), "Then address the logs"),
            None
        );
    }

    #[test]
    fn inflected_verb_is_not_the_required_substring() {
        // "configuring" drops the trailing "e" of "configure"
        assert!(
            check_required_elements(Category::HowTo, rules(Category::HowTo), "Configuring the server").is_some()
        );
    }

    #[test]
    fn required_element_missing_uses_first_rationale() {
        let finding =
            check_required_elements(Category::Reference, rules(Category::Reference), "A plain page.").unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert_eq!(finding.concern, Concern::Language);
        assert_eq!(finding.message, "Missing typical reference language patterns");
        assert_eq!(finding.suggestion.as_deref(), Some("Reference docs need factual language"));
    }

    #[test]
    fn no_required_patterns_is_noop() {
        let mut set = rules(Category::Tutorial).clone();
        set.required_elements.clear();
        assert_eq!(check_required_elements(Category::Tutorial, &set, ""), None);
    }
}
