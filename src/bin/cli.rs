//! tableadapter CLI
//!
//! Command-line stand-in for the grid window: seed, show and convert tables.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tableadapter::{Adapter, Config, Format, Result, TableAdapter, Workbench};
use tracing_subscriber::{fmt, EnvFilter};

/// tableadapter CLI
#[derive(Parser, Debug)]
#[command(name = "tableadapter")]
#[command(about = "Save and load tables as text or binary files")]
#[command(version)]
struct Args {
    /// Cell separator for the text format
    #[arg(short, long, default_value_t = ';')]
    separator: char,

    /// fsync files after writing
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the sample product table
    Seed {
        /// File format (text or binary)
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Target file (defaults to data.txt / data.dat)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Load a table and print its rows
    Show {
        /// File format (text or binary)
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Source file (defaults to data.txt / data.dat)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Load a table in one format and save it in another
    ///
    /// Formats are inferred from the file extensions.
    Convert {
        /// Source file (.txt/.csv or .dat/.bin)
        from: PathBuf,

        /// Target file (.txt/.csv or .dat/.bin)
        to: PathBuf,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .separator(args.separator)
        .sync_on_write(args.sync)
        .build()?;

    match args.command {
        Commands::Seed { format, path } => {
            let path = resolve(&config, format, path);
            let adapter = Adapter::new(format, &config)?;
            let mut workbench = Workbench::with_sample();
            let outcome = workbench.save(&adapter, &path)?;
            println!("{}", outcome);
        }
        Commands::Show { format, path } => {
            let path = resolve(&config, format, path);
            let adapter = Adapter::new(format, &config)?;
            let mut workbench = Workbench::default();
            workbench.load(&adapter, &path)?;
            for row in workbench.table() {
                println!("{}", row.join(" | "));
            }
        }
        Commands::Convert { from, to } => {
            let source = Adapter::for_path(&from, &config)?;
            let target = Adapter::for_path(&to, &config)?;
            convert(&source, &from, &target, &to)?;
        }
    }

    Ok(())
}

fn resolve(config: &Config, format: Format, path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| config.path_for(format).to_path_buf())
}

fn convert(source: &dyn TableAdapter, from: &Path, target: &dyn TableAdapter, to: &Path) -> Result<()> {
    let mut workbench = Workbench::default();
    let loaded = workbench.load(source, from)?;
    let saved = workbench.save(target, to)?;
    println!("{} ({} rows)", loaded, loaded.rows);
    println!("{}", saved);
    Ok(())
}
