pub mod alias;
pub mod audit;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod reconcile;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands, ReconcileArgs};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("population_reconciler", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        None => reconcile::execute(&ReconcileArgs::default()),
        Some(Commands::Reconcile(args)) => reconcile::execute(&args),
        Some(Commands::Audit(args)) => audit::execute(&args),
    }
}
