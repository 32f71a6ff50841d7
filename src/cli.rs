//! CLI argument definitions for dampener.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dampener")]
#[command(version)]
#[command(about = "Report safety checks with a problem dampener", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    dampener check inputs.txt     Count safe reports with and without the dampener\n    dampener explain 1 3 2 4 5    Show why a single report is safe or unsafe"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./dampener.md merged over ~/.config/dampener/config.md)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count safe reports, with and without the dampener
    Check {
        /// Report file, one report per line (default: reports.input from config)
        file: Option<PathBuf>,
        /// Skip lines that are not integers instead of stopping
        #[arg(long)]
        skip_invalid: bool,
        /// Also count safe reports for this removal budget (can be specified multiple times)
        #[arg(long, value_name = "N")]
        budget: Vec<u32>,
        /// Show which level the dampener removed for each report
        #[arg(short, long)]
        verbose: bool,
    },
    /// Explain the verdict for a single report
    Explain {
        /// Report levels, e.g. `dampener explain 1 3 2 4 5`
        #[arg(required = true, allow_negative_numbers = true, num_args = 1..)]
        levels: Vec<i64>,
        /// Largest removal budget to evaluate (default: largest configured budget)
        #[arg(long, value_name = "N")]
        budget: Option<u32>,
    },
    /// Total distance and similarity score of paired location lists
    Distance {
        /// Lists file with two columns (default: lists.input from config)
        file: Option<PathBuf>,
    },
    /// Sum `mul` instructions found in corrupted memory
    Scan {
        /// Memory dump (default: scan.input from config)
        file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Include commit and build date
        #[arg(short, long)]
        verbose: bool,
    },
}
