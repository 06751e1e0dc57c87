use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ara_view_renderer::config::Settings;
use ara_view_renderer::error::AppError;
use ara_view_renderer::metrics::encode_metrics;
use ara_view_renderer::telemetry::init_telemetry;
use ara_view_renderer::view::{Bindings, ViewRenderer};

/// Render a view, expanding its partials and substituting variables
#[derive(Debug, Parser)]
#[command(name = "ara-view-renderer", version, about)]
struct Cli {
    /// Dotted view identifier, e.g. `pages.home`
    name: String,

    /// Extra configuration file layered over config/default
    #[arg(short, long, env = "ARA_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Views root directory (overrides `views.path`)
    #[arg(long, value_name = "DIR")]
    views: Option<PathBuf>,

    /// View file extension (overrides `views.extension`)
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Bind a variable; may be repeated and wins over --vars-file
    #[arg(short = 'D', long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// JSON object of variable bindings
    #[arg(long, value_name = "FILE")]
    vars_file: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after rendering
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = load_settings(&cli).context("Failed to load configuration")?;

    // Initialize tracing
    init_telemetry(&settings.logging).context("Failed to initialize logging")?;
    tracing::debug!(views = %settings.views.path.display(), "Configuration loaded");

    if let Err(e) = run(&cli, &settings) {
        e.report();
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if let Some(views) = &cli.views {
        settings.views.path = views.clone();
    }
    if let Some(extension) = &cli.extension {
        settings.views.extension = extension.clone();
    }

    Ok(settings)
}

fn run(cli: &Cli, settings: &Settings) -> Result<(), AppError> {
    let bindings = load_bindings(cli)?;
    let renderer = ViewRenderer::from_settings(settings);

    let output = renderer.render(&cli.name, &bindings)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    if cli.metrics {
        eprint!("{}", encode_metrics()?);
    }

    Ok(())
}

fn load_bindings(cli: &Cli) -> Result<Bindings, AppError> {
    let mut bindings = match &cli.vars_file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Bindings::from_json(serde_json::from_str(&text)?)?
        }
        None => Bindings::new(),
    };

    for assignment in &cli.vars {
        let (name, value) = Bindings::parse_assignment(assignment)?;
        bindings.insert(name, value);
    }

    Ok(bindings)
}
