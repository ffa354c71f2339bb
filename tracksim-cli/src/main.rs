//! tracksim CLI: item similarity build and rating prediction over a SQLite
//! rating store.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracksim_core::config::{CliOverrides, TracksimConfig};
use tracksim_core::errors::{PipelineError, TracksimErrorCode};
use tracksim_core::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "tracksim")]
#[command(about = "Item-based collaborative filtering over a rating log")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./tracksim.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Rating database path
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load headerless rating CSVs into the database
    Import {
        /// `user_id,item_id,rating` rows
        #[arg(long)]
        training: PathBuf,

        /// `user_id,item_id` rows to predict
        #[arg(long)]
        test: Option<PathBuf>,
    },

    /// Build the item similarity table
    Similarities {
        /// Delete existing similarities first
        #[arg(long)]
        clear: bool,

        /// Skip this many items of the ordered item set
        #[arg(long, value_name = "N")]
        resume_from: Option<usize>,

        /// Score items on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Predict ratings and write them as CSV
    Predict {
        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,

        /// Predict the held-out sample instead of the test set
        #[arg(long)]
        holdout: bool,
    },

    /// Compare a prediction file with the held-out sample
    Evaluate {
        /// Prediction CSV file
        #[arg(short, long)]
        predictions: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            db_path: self.db.clone(),
            ..CliOverrides::default()
        };
        match &self.command {
            Commands::Similarities { parallel: true, .. } => overrides.parallel = Some(true),
            Commands::Predict { output, .. } => overrides.output_path = output.clone(),
            Commands::Evaluate { predictions, .. } => {
                overrides.predictions_path = predictions.clone()
            }
            _ => {}
        }
        overrides
    }

    fn load_config(&self) -> Result<TracksimConfig, PipelineError> {
        let overrides = self.overrides();
        let config = match &self.config {
            Some(path) => TracksimConfig::load_file(path, Some(&overrides))?,
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                TracksimConfig::load(&cwd, Some(&overrides))?
            }
        };
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let config = cli.load_config()?;
    match &cli.command {
        Commands::Import { training, test } => {
            commands::import::run(&config, training, test.as_deref())
        }
        Commands::Similarities {
            clear, resume_from, ..
        } => commands::similarities::run(&config, *clear, *resume_from),
        Commands::Predict { holdout, .. } => commands::predict::run(&config, *holdout),
        Commands::Evaluate { json, .. } => commands::evaluate::run(&config, *json),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "tracksim failed");
            eprintln!("Error: {}", e.diagnostic());
            ExitCode::FAILURE
        }
    }
}
