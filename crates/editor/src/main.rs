// Chunk: docs/chunks/reconciliation - Dependency reconciliation for the text surface
//!
//! quill-render: styles a file headlessly and prints it with ANSI colors.
//!
//! Runs one full reconciliation pass over the file using the in-memory
//! surface, exactly as a host editor would on open, then writes the
//! attributed text to stdout.

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use quill::render::{describe_metrics, render_ansi};
use quill::{config, logging, ConfigFile, EditorConfig, ReconciliationController};
use quill_surface::{AttributedBuffer, RulerState};
use quill_syntax::{Language, LanguageRegistry};

#[derive(Debug, Parser)]
#[command(name = "quill-render", version, about = "Render a source file with syntax colors")]
struct Cli {
    /// File to render
    file: PathBuf,

    /// Config file (defaults to <config_dir>/quill/editor.json if it exists)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language id, overriding the file extension and config
    #[arg(long)]
    language: Option<String>,

    /// Built-in theme name or path to a theme JSON file
    #[arg(long)]
    theme: Option<String>,

    /// Spaces per tab
    #[arg(long)]
    tab_width: Option<NonZeroUsize>,

    /// Line-height multiple
    #[arg(long = "line-height")]
    line_height: Option<f64>,

    /// Print the computed metrics after the text
    #[arg(long)]
    metrics: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&cli.file).map_err(|e| format!("failed to read {}: {}", cli.file.display(), e))?;
    let registry = LanguageRegistry::new();

    let config = build_config(&cli, text, &registry)?;
    tracing::info!(
        file = %cli.file.display(),
        language = %config.language,
        theme = config.theme.name(),
        "rendering"
    );

    let controller = ReconciliationController::new(config, AttributedBuffer::new(""), RulerState::new(), registry)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_ansi(controller.surface(), &mut out)?;
    if cli.metrics {
        writeln!(out)?;
        writeln!(out, "{}", describe_metrics(controller.metrics()))?;
    }
    out.flush()?;
    Ok(())
}

/// Config file first, then command-line overrides.
fn build_config(cli: &Cli, text: String, registry: &LanguageRegistry) -> Result<EditorConfig, Box<dyn std::error::Error>> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => match ConfigFile::default_path().filter(|p| p.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using default config file");
                ConfigFile::load(&path)?
            }
            None => ConfigFile::default(),
        },
    };

    let mut config = file.into_config(text, registry.language_for_path(&cli.file))?;
    if let Some(language) = &cli.language {
        config.language = Language::new(language);
    }
    if let Some(theme) = &cli.theme {
        config.theme = config::resolve_theme(theme)?;
    }
    if let Some(width) = cli.tab_width {
        config = config.with_tab_width(width);
    }
    if let Some(multiple) = cli.line_height {
        config = config.with_line_height_multiple(multiple);
    }
    config.validate()?;
    Ok(config)
}
