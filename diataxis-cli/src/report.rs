// Plain-text rendering of analysis results for terminals and CI logs.

use diataxis_core::{AnalysisResult, BatchSummary, Severity};
use std::fmt::Write;

const RULE: &str = "============================================================";

/// Block for one document, or `None` when there is nothing to show.
/// Without `verbose` only documents with findings are rendered.
pub fn format_document(result: &AnalysisResult, verbose: bool) -> Option<String> {
    if result.findings.is_empty() && !verbose {
        return None;
    }

    let mut lines = vec![format!("\n{}", result.identifier)];

    if let Some(declared) = &result.declared_raw {
        lines.push(format!("  Declared type: {declared}"));
    }
    if verbose {
        if let Some(inferred) = result.inferred {
            lines.push(format!("  Inferred type: {inferred}"));
        }
    }

    if !result.findings.is_empty() {
        lines.push(format!("  {} violation(s):", result.findings.len()));

        for (severity, label) in [
            (Severity::Error, "ERROR"),
            (Severity::Warning, "WARNING"),
            (Severity::Info, "INFO"),
        ] {
            for finding in result.findings.iter().filter(|f| f.severity == severity) {
                lines.push(format!("    [{label}] Line {}: {}", finding.line, finding.message));
                if verbose {
                    if let Some(suggestion) = &finding.suggestion {
                        lines.push(format!("      → {suggestion}"));
                    }
                }
            }
        }
    }

    Some(lines.join("\n"))
}

pub fn format_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total files analyzed: {}", summary.total_files);
    let _ = writeln!(out, "Files with violations: {}", summary.files_with_findings);
    let _ = writeln!(out, "Files with errors: {}", summary.files_with_errors);
    let _ = writeln!(out, "Total violations: {}", summary.total_findings);
    let _ = writeln!(out, "Type mismatches: {}", summary.category_mismatches);

    let _ = writeln!(out, "\nBy severity:");
    let _ = writeln!(out, "  Errors: {}", summary.by_severity.errors);
    let _ = writeln!(out, "  Warnings: {}", summary.by_severity.warnings);
    let _ = writeln!(out, "  Info: {}", summary.by_severity.infos);

    if !summary.category_distribution.is_empty() {
        let _ = writeln!(out, "\nDiataxis type distribution:");
        for (category, count) in &summary.category_distribution {
            let _ = writeln!(out, "  {category}: {count}");
        }
    }

    out
}

/// Full text report: per-document blocks, then the summary.
pub fn format_report(results: &[AnalysisResult], summary: &BatchSummary, verbose: bool) -> String {
    let blocks: Vec<String> = results
        .iter()
        .filter_map(|result| format_document(result, verbose))
        .collect();

    let mut out = if blocks.is_empty() {
        "\n✓ No violations found!".to_string()
    } else {
        blocks.join("\n")
    };
    out.push('\n');
    out.push_str(&format_summary(summary));
    out
}
