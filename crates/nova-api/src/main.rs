//! Nova relay server and terminal client.
//!
//! Binary name: `nova`
//!
//! `nova serve` runs the HTTP relay; `nova chat` and `nova history` are the
//! terminal counterparts of the browser client.

mod cli;
mod http;
mod purge;
mod state;

use clap::Parser;

use nova_infra::config::load_dotenv;
use nova_infra::filesystem::resolve_data_dir;
use nova_infra::transcript::json_file::JsonTranscriptStore;
use nova_observe::tracing_setup::{
    filter_for_verbosity, init_tracing, shutdown_tracing, LogFormat, TracingOptions,
};

use cli::{Cli, Commands, HistoryAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();

    let options = match &cli.command {
        Commands::Serve {
            otel, log_format, ..
        } => TracingOptions {
            format: *log_format,
            default_filter: filter_for_verbosity(cli.verbose, cli.quiet, "info").to_string(),
            enable_otel: *otel,
        },
        _ => TracingOptions {
            format: LogFormat::Pretty,
            default_filter: filter_for_verbosity(cli.verbose, cli.quiet, "warn").to_string(),
            enable_otel: false,
        },
    };
    if let Err(e) = init_tracing(&options) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }
    dotenv.log();

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            host, port, config, ..
        } => {
            cli::serve::serve(config.as_deref(), host, port).await?;
        }

        Commands::Chat {
            server,
            token,
            user,
        } => {
            cli::chat::run_chat(&server, token, user.as_deref()).await?;
        }

        Commands::History { action } => {
            let store = JsonTranscriptStore::in_data_dir(&resolve_data_dir());
            match action {
                HistoryAction::Show { user, json } => {
                    cli::history::show(&store, user.as_deref(), json).await?;
                }
                HistoryAction::Clear { user } => {
                    cli::history::clear(&store, user.as_deref()).await?;
                }
            }
        }
    }

    Ok(())
}
