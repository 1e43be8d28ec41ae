use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_PRIMARY_PATH: &str = "data/countries.json";
pub const DEFAULT_REFERENCE_PATH: &str = "data/api_data.json";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Fill zero population figures in a country dataset from a reference snapshot",
    long_about = None
)]
pub struct Cli {
    /// Defaults to `reconcile` with default paths when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill zero populations and rewrite the primary dataset
    Reconcile(ReconcileArgs),
    /// Report how each zero-population record would resolve, without writing
    Audit(AuditArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Primary country dataset (JSON array)
    #[arg(short = 'p', long = "primary", default_value = DEFAULT_PRIMARY_PATH)]
    pub primary: PathBuf,
    /// Reference snapshot supplying population figures (JSON array)
    #[arg(short = 'r', long = "reference", default_value = DEFAULT_REFERENCE_PATH)]
    pub reference: PathBuf,
    /// Extra alias rules (YAML or JSON) merged over the built-in ones
    #[arg(short = 'a', long = "aliases")]
    pub aliases: Option<PathBuf>,
}

impl Default for DatasetArgs {
    fn default() -> Self {
        DatasetArgs {
            primary: PathBuf::from(DEFAULT_PRIMARY_PATH),
            reference: PathBuf::from(DEFAULT_REFERENCE_PATH),
            aliases: None,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub datasets: DatasetArgs,
    /// Write the reconciled dataset here instead of overwriting the primary file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Scan and report without writing any file
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub datasets: DatasetArgs,
}
