//! CLI module for Raavan.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Raavan - ask the king of Lanka about the Ramayan, or have him read your stars.
///
/// Answers come from a language model grounded in passages retrieved from an indexed copy of
/// the Ramayan. The horoscope command computes a birth chart of the Sun, Moon and planets.
#[derive(Parser, Debug)]
#[command(name = "raavan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RAAVAN_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file and create the data directory
    Init,

    /// Check configuration, API keys and the knowledge base
    Doctor,

    /// Ask Raavan a single question
    Ask {
        /// The question to ask
        question: String,

        /// LLM model to use for the answer
        #[arg(short, long)]
        model: Option<String>,

        /// Number of passages to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Start an interactive chat session
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Calculate a birth chart
    Horoscope {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Place of birth
        #[arg(short, long)]
        location: String,

        /// Date of birth (YYYY-MM-DD), defaults to horoscope.default_birth_date
        #[arg(short, long)]
        date: Option<String>,

        /// Time of birth in UT (HH:MM), defaults to horoscope.default_birth_time
        #[arg(short, long)]
        time: Option<String>,

        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
    },

    /// Index .txt and .md files into the knowledge base
    Index {
        /// File or directory to index
        path: String,
    },

    /// Show what is in the knowledge base
    Stats,

    /// Start HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
