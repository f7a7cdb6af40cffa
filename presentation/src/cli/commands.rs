//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use survey_domain::OutputFormat as DomainOutputFormat;

/// Output format for rendered views
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and bar charts
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => DomainOutputFormat::Table,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for survey-dashboard
#[derive(Parser, Debug)]
#[command(name = "survey-dashboard")]
#[command(author, version, about = "Upload survey CSVs and explore the results")]
#[command(long_about = r#"
Survey Dashboard talks to a survey analysis backend: upload a CSV of survey
responses, browse the records as a table, and chart individual questions.

Without a command an interactive session is started.

Configuration is loaded from (in priority order):
1. SURVEY_* environment variables (e.g. SURVEY_API__BASE_URL)
2. --config <path>                Explicit config file
3. ./survey-dashboard.toml        Project-level config
4. ~/.config/survey-dashboard/config.toml   Global config

Example:
  survey-dashboard upload responses.csv
  survey-dashboard table --sentiment Positive --sort age --desc
  survey-dashboard chart q1 --group-by gender
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the survey backend
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Upload a survey CSV to the backend
    Upload {
        /// CSV file to upload
        file: PathBuf,
    },

    /// Show survey records as a table
    Table(TableArgs),

    /// Chart one question
    Chart {
        /// Question id (q1_rating, q2_rating, q3_open, q4_rating, q5_open or q1..q5)
        question: String,

        /// Demographic field to group by (gender, education_level, sentiment_label, age)
        #[arg(short, long, value_name = "FIELD")]
        group_by: Option<String>,
    },

    /// Show how many records carry each sentiment
    Sentiment,

    /// Start the interactive session (default)
    Interactive,
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct TableArgs {
    /// Only records with this sentiment (Positive, Negative, Neutral)
    #[arg(long, value_name = "SENTIMENT")]
    pub sentiment: Option<String>,

    /// Keep rows where any cell contains this text
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Column to sort by (key or label, e.g. age or "Q1 Rating")
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides configuration)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}
