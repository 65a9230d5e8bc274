use anyhow::Result;
use clap::Parser;
use curling_pp::config::Config;
use curling_pp::diagnostic::{build_preview_rows, format_preview};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Build the per-team, per-end curling table with score state and power-play context.
#[derive(Parser, Debug)]
#[command(name = "curling-pp", version)]
struct Cli {
    /// TOML config file. Built-in defaults are used when it does not exist.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Ends CSV (overrides paths.ends)
    #[arg(long)]
    ends: Option<PathBuf>,

    /// Games CSV (overrides paths.games)
    #[arg(long)]
    games: Option<PathBuf>,

    /// Output CSV, replaced on every run (overrides paths.output)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Ends in a regulation game (overrides pipeline.regulation_ends)
    #[arg(long)]
    regulation_ends: Option<u32>,

    /// Rows to show in the preview table (overrides pipeline.preview_rows)
    #[arg(long)]
    preview: Option<usize>,

    /// Print the run report as JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("curling_pp=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(ends) = cli.ends {
        config.paths.ends = ends;
    }
    if let Some(games) = cli.games {
        config.paths.games = games;
    }
    if let Some(output) = cli.output {
        config.paths.output = output;
    }
    if let Some(n) = cli.regulation_ends {
        config.pipeline.regulation_ends = n;
    }
    if let Some(n) = cli.preview {
        config.pipeline.preview_rows = n;
    }

    let outcome = curling_pp::run(&config.paths, &config.pipeline)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        return Ok(());
    }

    for line in outcome.report.summary_lines() {
        println!("{line}");
    }
    if config.pipeline.preview_rows > 0 {
        println!();
        print!(
            "{}",
            format_preview(&build_preview_rows(&outcome.rows, config.pipeline.preview_rows))
        );
    }

    Ok(())
}
