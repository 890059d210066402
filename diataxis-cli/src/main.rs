use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use diataxis_core::{DocumentProcessor, LintConfig, RuleBook, Severity, DEFAULT_EXTENSIONS};
use diataxis_lint::report::format_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeverityFilter {
    Error,
    Warning,
    Info,
    All,
}

impl SeverityFilter {
    fn minimum(self) -> Option<Severity> {
        match self {
            SeverityFilter::Error => Some(Severity::Error),
            SeverityFilter::Warning => Some(Severity::Warning),
            SeverityFilter::Info => Some(Severity::Info),
            SeverityFilter::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "diataxis-lint")]
#[command(about = "Check documentation pages for Diataxis compliance")]
struct Args {
    /// Docs directory or a single page to check
    #[arg(default_value = "src/content/docs")]
    path: PathBuf,

    /// Show inferred types, clean files and remediation hints
    #[arg(short, long)]
    verbose: bool,

    /// Minimum severity level to report
    #[arg(long, value_enum, default_value = "all")]
    severity: SeverityFilter,

    /// Path to custom rule config file (YAML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// File extension to scan when PATH is a directory (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Print the effective rule configuration as YAML and exit
    #[arg(long)]
    show_config: bool,
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr; stdout carries the report.
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = LintConfig::load(args.config.as_deref())
        .with_context(|| match &args.config {
            Some(path) => format!("failed to load config from {}", path.display()),
            None => "failed to build default config".to_string(),
        })?;

    if args.show_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    if !args.path.exists() {
        eprintln!("Error: Path does not exist: {}", args.path.display());
        std::process::exit(1);
    }

    let book = RuleBook::compile(&config).context("invalid rule configuration")?;
    let processor = DocumentProcessor::new(&book);

    let extensions: Vec<String> = if args.extensions.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
    } else {
        args.extensions.clone()
    };

    let mut results = analyze(&processor, &args.path, &extensions, args.format)?;

    if let Some(minimum) = args.severity.minimum() {
        for result in &mut results {
            result.retain_at_least(minimum);
        }
    }

    let report = processor.report(results);
    match args.format {
        OutputFormat::Text => print!("{}", format_report(&report.results, &report.summary, args.verbose)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn analyze(
    processor: &DocumentProcessor<'_>,
    path: &Path,
    extensions: &[String],
    format: OutputFormat,
) -> Result<Vec<diataxis_core::AnalysisResult>> {
    if path.is_file() {
        return Ok(vec![processor.analyze_path(path)]);
    }

    let discovery = diataxis_core::discover(path, extensions)
        .with_context(|| format!("failed to scan {}", path.display()))?;
    if format == OutputFormat::Text {
        println!(
            "Found {} .{} file(s) to analyze...",
            discovery.documents.len(),
            extensions.join("/.")
        );
    }
    Ok(processor.analyze_discovery(&discovery))
}
