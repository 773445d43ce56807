use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "otto")]
#[command(version)]
#[command(about = "Date/time resolution and tool-output compression for the Otto voice agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a date phrase ("tomorrow", "Feb 15") to YYYY-MM-DD
    Date {
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,

        /// Year for phrases without one (defaults to the reference year)
        #[arg(long)]
        year: Option<i32>,

        /// Reference date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Resolve a time phrase ("3pm", "9:15am") to 24-hour HH:MM
    Time {
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },

    /// Build a calendar event payload from spoken phrases
    Schedule {
        title: String,
        date: String,
        time: String,

        /// Fail instead of passing unresolved phrases through
        #[arg(long)]
        strict: bool,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Compress text from a file or stdin
    Compress {
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 0.0-1.0, higher shrinks more
        #[arg(short, long)]
        aggressiveness: Option<f64>,

        /// Skip compression below this many characters
        #[arg(long)]
        min_length: Option<usize>,
    },

    /// Run the batch self-check of date, time and compression handling
    Check,

    /// Interactive console for trying the resolver and compressor
    Console,

    /// Summarize recorded compression events
    Stats,

    /// Print version information
    Version,
}
