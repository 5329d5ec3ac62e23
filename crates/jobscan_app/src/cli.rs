//! Command-line definitions for `jobscan`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Checks job pages for the keywords you care about.
#[derive(Parser)]
#[command(name = "jobscan")]
#[command(version)]
pub(crate) struct Cli {
    /// RON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage the persisted keyword list
    Keywords {
        #[command(subcommand)]
        action: KeywordAction,
    },

    /// Check one page once and print the results
    Check {
        /// Page address
        url: String,
    },

    /// Interactive session with automatic re-checks
    Watch {
        /// Page to open in the first tab
        url: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum KeywordAction {
    /// Print the keywords in order
    List,

    /// Append keywords; duplicates and blanks are ignored
    Add {
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Remove keywords by exact value
    Remove {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}
