//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// City environmental survey dashboard
#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the survey database and logs
    #[arg(long, global = true, env = "SURVEY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, global = true, env = "SURVEY_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the observation table
    List {
        #[arg(long)]
        json: bool,
    },

    /// Add one observation
    Add(AddArgs),

    /// Remove an observation by id, or by its table position
    Remove {
        /// Observation id as shown by `list`
        #[arg(required_unless_present = "index", conflicts_with = "index")]
        id: Option<String>,

        /// 1-based table position
        #[arg(long)]
        index: Option<usize>,
    },

    /// Restore the demo observations
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },

    /// Export observations as vijayawada_survey.csv
    Export {
        /// Output directory (defaults to the data directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the CSV instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Show zone overlay colors
    Zones {
        /// ndvi|temperature
        #[arg(long, default_value = "ndvi")]
        mode: String,

        #[arg(long)]
        json: bool,
    },

    /// Show chart datasets
    Charts {
        #[arg(long)]
        json: bool,
    },

    /// Show map markers
    Markers {
        #[arg(long)]
        json: bool,
    },
}

/// Form fields; kept as text so the core validates them.
#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub area: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,
    #[arg(long, allow_hyphen_values = true)]
    pub temp: String,
    /// Yes|No
    #[arg(long, default_value = "No")]
    pub high_temp: String,
    #[arg(long, allow_hyphen_values = true)]
    pub aqi: String,
    #[arg(long, allow_hyphen_values = true)]
    pub green: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ndvi_now: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ndvi_past: String,
    #[arg(long, default_value = "")]
    pub note: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
