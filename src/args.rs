use crate::time::parse_duration;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CountdownCLI {
    /// Override data root path value, can also be overridden using $COUNTDOWN_ROOT
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CLISubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CLISubcommand {
    /// Create a new timer
    Add {
        /// Name of the timer (at most 50 characters)
        title: String,
        /// Length of the timer (XhYmZs or seconds)
        #[arg(value_parser = parse_duration::parse_arg)]
        duration: u64,
        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show all timers
    List,
    /// Start a paused timer or pause a running one
    Toggle {
        /// Timer id or a unique prefix of it
        id: String,
    },
    /// Reset a timer to its full duration, paused
    Restart { id: String },
    /// Change a timer, this always pauses it
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// New length, resets the countdown
        #[arg(long, value_parser = parse_duration::parse_arg)]
        duration: Option<u64>,
    },
    /// Remove a timer
    Delete { id: String },
    /// Count down all running timers in the foreground
    Run {
        /// Start these timers before counting down
        #[arg(short, long)]
        start: Vec<String>,
    },
}
