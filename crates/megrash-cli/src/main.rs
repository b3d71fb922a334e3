use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use megrash_core::{
    load_courts, rank_and_group, render_groups, summarize, CourtFilter, NearestQuery, SportFilter,
};

#[derive(Debug, Parser)]
#[command(name = "megrash-cli")]
#[command(about = "Query the MeGrash sports courts dataset offline")]
struct Cli {
    /// Courts CSV export.
    #[arg(long, global = true, env = "MEGRASH_DATASET_PATH", default_value = "./data/courts.csv")]
    dataset: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the nearest courts to a point, grouped by location, as JSON.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        count: i64,
        /// all, football, basketball, volleyball, multi-purpose, or a label fragment.
        #[arg(long = "type", default_value = "all")]
        court_type: String,
        #[arg(long)]
        surface: Option<String>,
        /// Only courts with lighting.
        #[arg(long)]
        lighting: bool,
        /// Drop locations whose courts cover more than one sport.
        #[arg(long)]
        exclude_mixed: bool,
    },
    /// Print dataset counts as JSON.
    Stats,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let courts = load_courts(&cli.dataset)
        .with_context(|| format!("loading courts from {}", cli.dataset.display()))?;

    let output = match cli.command {
        Commands::Nearest {
            lat,
            lon,
            count,
            court_type,
            surface,
            lighting,
            exclude_mixed,
        } => {
            let query = NearestQuery::new(Some(lat), Some(lon), count)?
                .with_filter(CourtFilter::new(
                    SportFilter::parse(&court_type),
                    surface.as_deref(),
                    lighting,
                ))
                .excluding_mixed(exclude_mixed);
            let groups = rank_and_group(&query, &courts);
            serde_json::to_string_pretty(&render_groups(&groups))?
        }
        Commands::Stats => serde_json::to_string_pretty(&summarize(&courts))?,
    };

    println!("{output}");
    Ok(())
}
