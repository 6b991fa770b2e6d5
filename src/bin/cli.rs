//! ArchLens CLI - analyze a source tree and emit the health report.

use anyhow::Context;
use archlens::{Analyzer, AnalyzerConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archlens")]
#[command(about = "Architectural health scoring from a source tree's import graph", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults apply when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source tree and emit the full JSON report
    Analyze {
        /// Root directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a short graph summary instead of the full report
    Stats {
        /// Root directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path),
        None => AnalyzerConfig::default(),
    };
    let analyzer = Analyzer::new(config);

    match cli.command {
        Commands::Analyze { path, output } => {
            let report = analyzer.analyze(&path)?;
            let json = report.to_json()?;

            match output {
                Some(out) => {
                    std::fs::write(&out, json)
                        .with_context(|| format!("writing report to {}", out.display()))?;
                    println!("✓ Report written to {}", out.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Stats { path } => {
            let report = analyzer.analyze(&path)?;
            let stats = report.graph_stats;

            println!("Graph Summary");
            println!("─────────────");
            println!("Nodes:      {}", stats.nodes);
            println!("Edges:      {}", stats.edges);
            println!("Density:    {:.4}", stats.density);
            println!(
                "Components: {}",
                report.analysis.association.component_count
            );
            println!(
                "Complexity: {}",
                report.analysis.association.architectural_complexity
            );
            println!(
                "Modularity: {:.4}",
                report.analysis.association.modularity
            );
        }
    }

    Ok(())
}
