//! `nova chat`: interactive terminal client.
//!
//! Keeps the transcript locally, keyed by user, and saves it after every
//! change so an interrupted session loses nothing.

pub mod client;
pub mod renderer;

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use nova_core::transcript::{storage_key, TranscriptStore};
use nova_infra::filesystem::resolve_data_dir;
use nova_infra::transcript::json_file::JsonTranscriptStore;
use nova_types::chat::{ChatMessage, Transcript};

use self::client::BotClient;
use self::renderer::ChatRenderer;

/// Bot message recorded when the server cannot be reached or fails.
pub const CONNECTION_ERROR: &str = "⚠️ Error connecting to server.";

/// Outcome of one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Turn {
    /// Blank input; nothing sent.
    Skip,
    /// The user asked to leave.
    Quit,
    /// The bot's answer (or the connection error text).
    Reply(String),
}

/// A chat conversation bound to a transcript store and a server.
pub struct ChatSession<S: TranscriptStore> {
    store: S,
    key: String,
    transcript: Transcript,
    client: BotClient,
}

impl<S: TranscriptStore> ChatSession<S> {
    /// Load the stored transcript for `user` and start a session.
    pub async fn open(store: S, user: Option<&str>, client: BotClient) -> anyhow::Result<Self> {
        let key = storage_key(user);
        let transcript = store.load(&key).await?;
        tracing::debug!(key = %key, messages = transcript.len(), "transcript loaded");
        Ok(Self {
            store,
            key,
            transcript,
            client,
        })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle one line of user input.
    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<Turn> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(Turn::Skip);
        }
        if input == "/quit" {
            return Ok(Turn::Quit);
        }

        self.transcript.push_user(line);
        self.store.save(&self.key, &self.transcript).await?;

        let text = match self.client.send(line).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "message not delivered");
                CONNECTION_ERROR.to_string()
            }
        };

        self.transcript.push_bot(text.clone());
        self.store.save(&self.key, &self.transcript).await?;
        Ok(Turn::Reply(text))
    }

    /// End the server session. Failures are logged and ignored.
    pub async fn close(&mut self) {
        if let Err(e) = self.client.logout().await {
            tracing::debug!(error = %e, "logout failed");
        }
    }
}

/// Style `bar` as the spinner shown while a reply is pending.
fn typing_indicator(bar: ProgressBar) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message("Nova is typing...");
    bar
}

/// Run the interactive loop on stdin/stdout.
pub async fn run_chat(server: &str, token: Option<String>, user: Option<&str>) -> anyhow::Result<()> {
    let store = JsonTranscriptStore::in_data_dir(&resolve_data_dir());
    let mut session = ChatSession::open(store, user, BotClient::new(server, token)?).await?;
    let renderer = ChatRenderer::new();

    println!();
    println!(
        "  {} Chatting with {} ({} to exit)",
        console::style("💬").bold(),
        console::style(server).cyan(),
        console::style("/quit").yellow()
    );
    println!();

    for message in session.transcript().messages() {
        println!("{}", renderer.render_message(message));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", console::style("›").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let spinner = typing_indicator(ProgressBar::new_spinner());
        spinner.enable_steady_tick(Duration::from_millis(80));
        let turn = session.handle_line(&line).await;
        spinner.finish_and_clear();

        match turn? {
            Turn::Skip => continue,
            Turn::Quit => break,
            Turn::Reply(text) => {
                println!("{}", renderer.render_message(&ChatMessage::bot(text)));
            }
        }
    }

    session.close().await;
    Ok(())
}
