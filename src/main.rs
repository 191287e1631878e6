mod analysis;
mod db;
mod error;
mod import;
mod settings;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(name = "heading_tags", about = "Heading word frequency report for crawled pages")]
struct Cli {
    /// Config file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database holding page records
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Record table to read and write
    #[arg(short, long, global = true)]
    table: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the record table
    Init,
    /// Store crawler output (one JSON page per line)
    Import {
        file: PathBuf,
    },
    /// Print ranked heading words per level
    Report,
    /// Show how many pages are stored
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())
        .context("loading settings")?
        .with_overrides(cli.db, cli.table);
    info!(db = ?settings.db_path, table = %settings.table, "settings loaded");

    let conn = db::connect(&settings.db_path)
        .with_context(|| format!("opening {:?}", settings.db_path))?;

    match cli.command {
        Commands::Init => {
            db::init_table(&conn, &settings.table)?;
            println!("Table '{}' ready", settings.table);
        }
        Commands::Import { file } => {
            db::init_table(&conn, &settings.table)?;
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("opening {:?}", file))?,
            );
            let n = import::import_pages(&conn, &settings.table, reader)
                .with_context(|| format!("importing {:?}", file))?;
            println!("Stored {} pages in '{}'", n, settings.table);
        }
        Commands::Report => {
            let rows = db::fetch_rows(&conn, &settings.table)
                .with_context(|| format!("reading table '{}'", settings.table))?;
            info!(rows = rows.len(), "loaded page records");
            let report = analysis::build_report(rows).context("building report")?;
            println!("{}", report);
        }
        Commands::Stats => {
            let n = db::count_rows(&conn, &settings.table)?;
            println!("Pages: {}", n);
        }
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    Ok(())
}
