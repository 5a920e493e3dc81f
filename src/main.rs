//! paperwright - Assemble generated outlines into DOCX documents

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use futures::executor::block_on;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use paperwright::{
    DocxExporter, ExportConfig, ExportRequest, Locale, PrerenderedCharts, StyledNode,
};

#[derive(Parser)]
#[command(name = "paperwright")]
#[command(version, about = "Assemble generated outlines into DOCX documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    paperwright request.json                       Write <title>.docx
    paperwright request.json essay.docx -c charts  Embed charts/<section>-<n>.png
    paperwright -i request.json                    Show the document outline")]
struct Cli {
    /// Export request (JSON)
    #[arg(value_name = "REQUEST")]
    input: PathBuf,

    /// Output file (defaults to a name derived from the title)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Title page template (.docx with {{FIELD}} placeholders)
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Directory of pre-rendered charts named <section-id>-<index>.png
    #[arg(short, long, value_name = "DIR")]
    charts: Option<PathBuf>,

    /// Label language (en, ru)
    #[arg(short, long, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Show the document outline without writing
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log classifier and reconciler decisions
    #[arg(short, long)]
    verbose: bool,
}

/// Request file: the request itself plus an optional `config` object.
#[derive(Deserialize)]
struct RequestFile {
    #[serde(flatten)]
    request: ExportRequest,
    #[serde(default)]
    config: Option<ExportConfig>,
}

fn parse_locale(tag: &str) -> Result<Locale, String> {
    Locale::from_tag(tag).ok_or_else(|| format!("unsupported locale: {tag}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "paperwright=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let RequestFile {
        mut request,
        config,
    } = read_request(&cli.input)?;
    if let Some(locale) = cli.locale {
        request.locale = Some(locale);
    }

    let template = cli
        .template
        .as_ref()
        .map(|path| std::fs::read(path).map_err(|e| format!("{}: {e}", path.display())))
        .transpose()?;
    let charts = match &cli.charts {
        Some(dir) => PrerenderedCharts::from_dir(dir).map_err(|e| format!("{}: {e}", dir.display()))?,
        None => PrerenderedCharts::new(),
    };

    let exporter = DocxExporter::new().with_config(config.unwrap_or_default());

    if cli.info {
        return show_info(&exporter, &request, template.as_deref(), &charts);
    }

    let output = block_on(exporter.export(&request, template.as_deref(), &charts))
        .map_err(|e| format!("{e} ({:?})", e.hint()))?;
    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&output.file_name));
    // Bytes are complete before anything touches the disk.
    std::fs::write(&path, &output.bytes).map_err(|e| format!("{}: {e}", path.display()))?;

    if !cli.quiet {
        for warning in &output.warnings {
            eprintln!("warning: {warning}");
        }
        println!("Wrote {} ({} bytes)", path.display(), output.bytes.len());
    }
    Ok(())
}

fn read_request(path: &Path) -> Result<RequestFile, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}

fn show_info(
    exporter: &DocxExporter,
    request: &ExportRequest,
    template: Option<&[u8]>,
    charts: &PrerenderedCharts,
) -> Result<(), String> {
    let composition =
        block_on(exporter.compose(request, template, charts)).map_err(|e| e.to_string())?;
    let document = &composition.document;

    println!("Title: {}", document.title);
    println!("Author: {}", document.author);
    println!("Language: {}", document.language);
    println!("Sections: {}", request.sections.len());
    println!("Charts available: {}", charts.len());
    println!("Outline:");
    for heading in document.headings() {
        println!("  {heading}");
    }

    let tables = document
        .nodes
        .iter()
        .filter(|n| matches!(n, StyledNode::Table(_)))
        .count();
    let figures = document
        .nodes
        .iter()
        .filter(|n| matches!(n, StyledNode::Image(_)))
        .count();
    println!("Tables: {tables}");
    println!("Figures: {figures}");

    for warning in &composition.warnings {
        println!("Warning: {warning}");
    }
    Ok(())
}
