//! CLI command definitions for the `nova` binary.

pub mod chat;
pub mod history;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nova_observe::tracing_setup::LogFormat;

/// Chat relay server and terminal client.
#[derive(Parser)]
#[command(name = "nova", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP relay server.
    Serve {
        /// Bind address (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config).
        #[arg(long, short)]
        port: Option<u16>,

        /// Path to a TOML config file.
        #[arg(long, short, env = "NOVA_CONFIG")]
        config: Option<PathBuf>,

        /// Export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,

        /// Log output format: pretty or json.
        #[arg(long, default_value = "pretty")]
        log_format: LogFormat,
    },

    /// Chat with a running server from the terminal.
    Chat {
        /// Base URL of the relay server.
        #[arg(long, env = "NOVA_SERVER", default_value = "http://localhost:5000")]
        server: String,

        /// Bearer token sent with every message.
        #[arg(long, env = "NOVA_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// User identity the local history is kept under.
        #[arg(long)]
        user: Option<String>,
    },

    /// Inspect or clear local chat history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print the stored transcript.
    Show {
        #[arg(long)]
        user: Option<String>,

        /// Output the raw JSON transcript.
        #[arg(long)]
        json: bool,
    },

    /// Delete the stored transcript.
    Clear {
        #[arg(long)]
        user: Option<String>,
    },
}
