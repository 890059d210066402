//! End-to-end scenarios: frontmatter + body text in, AnalysisResult out.
//!
//! Each test builds a page the way authors write them (frontmatter block,
//! markdown body) and asserts on the exact findings produced.

use diataxis_lint_core::{
    AnalysisResult, BatchReport, Category, Concern, DocumentProcessor, LintConfig, RuleBook, Severity,
};
use std::fs;

// ============================================================================
// Helpers
// ============================================================================

fn page(diataxis_type: &str, body: &str) -> String {
    format!("---\ntitle: Sample\ndescription: A sample page\ndiataxis_type: {diataxis_type}\n---\n{body}")
}

fn analyze(text: &str) -> AnalysisResult {
    DocumentProcessor::default().analyze("page.mdx", text)
}

fn of_concern(result: &AnalysisResult, concern: Concern) -> Vec<(Severity, String)> {
    result
        .findings
        .iter()
        .filter(|f| f.concern == concern)
        .map(|f| (f.severity, f.message.clone()))
        .collect()
}

fn fences(n: usize) -> String {
    (0..n).map(|i| format!("```sh\necho {i}\n```\n\n")).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn no_frontmatter_yields_exactly_one_error() {
        let result = analyze("# Title\n\nYou can consider various ways. Step 1: because.\n");
        assert_eq!(result.findings.len(), 1);
        let finding = &result.findings[0];
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.concern, Concern::Frontmatter);
        assert_eq!(finding.message, "Missing YAML frontmatter");
        assert_eq!(finding.line, 1);
        assert_eq!(result.declared, None);
    }

    #[test]
    fn how_to_with_learning_language() {
        let result = analyze(&page("how-to", "Let's learn about configuring this.\n"));
        assert_eq!(result.declared, Some(Category::HowTo));

        let language: Vec<_> = result
            .findings
            .iter()
            .filter(|f| f.concern == Concern::Language && f.severity == Severity::Warning)
            .collect();
        assert_eq!(language.len(), 2);
        assert_eq!(language[0].suggestion.as_deref(), Some("Found: Let's"));
        assert_eq!(language[1].suggestion.as_deref(), Some("Found: learn about"));
        assert!(language.iter().all(|f| f.line == 6));

        assert!(of_concern(&result, Concern::Frontmatter).is_empty());
        assert!(!result.has_errors());

        // "configuring" is not one of the action verbs, so the page also
        // lacks typical how-to language.
        let info: Vec<_> = result
            .findings
            .iter()
            .filter(|f| f.concern == Concern::Language && f.severity == Severity::Info)
            .collect();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].message, "Missing typical how-to language patterns");
        assert_eq!(info[0].suggestion.as_deref(), Some("How-tos need action verbs"));
    }

    #[test]
    fn how_to_required_verb_satisfied_by_configure() {
        let result = analyze(&page("how-to", "Let's learn about how to configure this.\n"));
        assert!(!result
            .findings
            .iter()
            .any(|f| f.concern == Concern::Language && f.severity == Severity::Info));
    }

    #[test]
    fn reference_with_three_code_blocks_has_no_structural_findings() {
        let body = format!("This page describes the CLI and lists its flags.\n\n{}", fences(3));
        let result = analyze(&page("reference", &body));
        assert!(of_concern(&result, Concern::Structure).is_empty());
    }

    #[test]
    fn explanation_with_four_code_blocks_warns_once() {
        let body = format!("The reason this exists is history.\n\n{}", fences(4));
        let result = analyze(&page("explanation", &body));
        assert_eq!(
            of_concern(&result, Concern::Structure),
            vec![(
                Severity::Warning,
                "Explanation has many code blocks - consider moving to how-to".to_string()
            )]
        );
    }

    #[test]
    fn same_forbidden_word_on_three_lines() {
        let body = "You should pin versions.\nplain\nyou should cache.\nalso: YOU SHOULD retry.\n";
        let result = analyze(&page("reference", body));
        let hits: Vec<_> = result
            .findings
            .iter()
            .filter(|f| f.suggestion.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("Found: you should")))
            .map(|f| f.line)
            .collect();
        assert_eq!(hits, vec![6, 8, 9]);
    }

    #[test]
    fn empty_frontmatter_block_reports_each_missing_field() {
        let expected = vec![
            (Severity::Error, "Missing required field: title".to_string()),
            (Severity::Error, "Missing required field: description".to_string()),
            (Severity::Warning, "Missing diataxis_type field".to_string()),
        ];
        for text in ["---\n---\nBody.\n", "---\njust words\n---\nBody.\n"] {
            let result = analyze(text);
            assert_eq!(of_concern(&result, Concern::Frontmatter), expected, "{text:?}");
            assert_eq!(result.findings.len(), 3);
        }
    }

    #[test]
    fn missing_category_key_skips_content_rules() {
        let text = "---\ntitle: T\ndescription: D\n---\nYou can consider optionally.\n";
        let result = analyze(text);
        assert_eq!(
            of_concern(&result, Concern::Frontmatter),
            vec![(Severity::Warning, "Missing diataxis_type field".to_string())]
        );
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn invalid_category_is_error_without_mismatch() {
        let text = "---\ntitle: T\ndescription: D\ndiataxis_type: Tutorial\n---\nIn this tutorial, let's start.\n";
        let result = analyze(text);
        assert_eq!(result.inferred, Some(Category::Tutorial));
        assert_eq!(result.declared, None);
        assert_eq!(
            result.findings.iter().map(|f| f.message.as_str()).collect::<Vec<_>>(),
            vec!["Invalid diataxis_type: Tutorial"]
        );
        assert!(result.has_errors());
    }

    #[test]
    fn declared_matches_inferred() {
        let body = "In this tutorial you will build a calendar. Let's start.\n";
        let result = analyze(&page("tutorial", body));
        assert_eq!(result.inferred, Some(Category::Tutorial));
        assert!(!result.category_mismatch());
        assert!(result.findings.is_empty(), "{:?}", result.findings);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let text = page("explanation", &format!("Step 1: configure it. You must.\n{}", fences(3)));
        let processor = DocumentProcessor::default();
        let first = processor.analyze("page.mdx", &text);
        let second = processor.analyze("page.mdx", &text);
        assert_eq!(first.findings, second.findings);
        assert_eq!(first.inferred, second.inferred);
    }
}

// ============================================================================
// Batches on disk
// ============================================================================

mod batches {
    use super::*;

    #[test]
    fn results_sorted_by_identifier() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zeta.mdx"), page("reference", "Defines things.\n")).unwrap();
        fs::write(dir.path().join("alpha.mdx"), "no frontmatter").unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        fs::write(dir.path().join("guides/mid.mdx"), page("how-to", "You need Docker. Add it.\n")).unwrap();

        let processor = DocumentProcessor::default();
        let paths = vec![
            dir.path().join("zeta.mdx"),
            dir.path().join("guides/mid.mdx"),
            dir.path().join("alpha.mdx"),
        ];
        let results = processor.analyze_paths(&paths);
        let ids: Vec<_> = results.iter().map(|r| r.identifier.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn unreadable_document_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.mdx"), page("reference", "Lists the flags.\n")).unwrap();
        fs::write(dir.path().join("bad.mdx"), [0xffu8, 0xfe, 0xfd]).unwrap();

        let processor = DocumentProcessor::default();
        let results = processor
            .analyze_root(dir.path(), &["mdx".to_string()])
            .unwrap();
        assert_eq!(results.len(), 2);

        let bad = results.iter().find(|r| r.identifier.ends_with("bad.mdx")).unwrap();
        assert_eq!(bad.findings.len(), 1);
        assert_eq!(bad.findings[0].concern, Concern::File);
        assert_eq!(bad.findings[0].severity, Severity::Error);

        let good = results.iter().find(|r| r.identifier.ends_with("good.mdx")).unwrap();
        assert!(!good.has_errors());
    }

    #[cfg(unix)]
    #[test]
    fn unvisitable_entries_become_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.mdx"), page("reference", "Lists the flags.\n")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("shared")).unwrap();

        let results = DocumentProcessor::default()
            .analyze_root(dir.path(), &["mdx".to_string()])
            .unwrap();
        assert_eq!(results.len(), 2);

        let shared = results.iter().find(|r| r.identifier.ends_with("shared")).unwrap();
        assert_eq!(shared.findings.len(), 1);
        assert_eq!(shared.findings[0].concern, Concern::File);
        assert_eq!(shared.findings[0].severity, Severity::Error);
        assert!(shared.findings[0].message.starts_with("Error reading file: "));

        let good = results.iter().find(|r| r.identifier.ends_with("good.mdx")).unwrap();
        assert!(!good.has_errors());
    }

    #[test]
    fn report_carries_summary_and_fingerprint() {
        let processor = DocumentProcessor::default();
        let results = vec![
            processor.analyze("a.mdx", &page("how-to", "Prerequisites: none. Add it.\n")),
            processor.analyze("b.mdx", "nothing"),
        ];
        let report = processor.report(results);
        assert_eq!(report.summary.total_files, 2);
        assert_eq!(report.summary.files_with_errors, 1);
        assert_eq!(report.summary.category_distribution.get("how-to"), Some(&1));
        assert_eq!(report.ruleset_fingerprint, LintConfig::default().fingerprint().unwrap());
        assert!(report.has_errors());

        let json = report.to_json().unwrap();
        let back: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results.len(), 2);
        assert_eq!(back.results[0].declared, Some(Category::HowTo));
    }

    #[test]
    fn custom_rule_book_changes_verdicts() {
        let yaml = r#"
rules:
  tutorial:
    forbidden_phrases:
      - pattern: '\bsimply\b'
        rationale: "Nothing is simple for a learner"
  how-to: {}
  reference: {}
  explanation:
    structural:
      - kind: max_code_blocks
        limit: 0
        message: "No code in explanations"
        suggestion: "Move code to a how-to"
"#;
        let config = LintConfig::from_yaml(yaml).unwrap();
        let book = RuleBook::compile(&config).unwrap();
        let processor = DocumentProcessor::new(&book);

        let tutorial = processor.analyze("t.mdx", &page("tutorial", "Simply run it.\n"));
        assert_eq!(
            of_concern(&tutorial, Concern::Language),
            vec![(
                Severity::Warning,
                "Anti-pattern detected in tutorial: Nothing is simple for a learner".to_string()
            )]
        );

        let explanation = processor.analyze("e.mdx", &page("explanation", &fences(1)));
        assert_eq!(
            of_concern(&explanation, Concern::Structure),
            vec![(Severity::Warning, "No code in explanations".to_string())]
        );
        assert_ne!(book.fingerprint(), RuleBook::builtin().fingerprint());
    }
}
