//! `nova history show|clear`: manage the local chat transcript.

use nova_core::transcript::{storage_key, TranscriptStore};

use super::chat::renderer::ChatRenderer;

/// Print the transcript stored for `user`.
pub async fn show<S: TranscriptStore>(store: &S, user: Option<&str>, json: bool) -> anyhow::Result<()> {
    let key = storage_key(user);
    let transcript = store.load(&key).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    if transcript.is_empty() {
        println!();
        println!("  {}", console::style("No chat history yet.").dim());
        println!();
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    println!();
    for message in transcript.messages() {
        println!("{}", renderer.render_message(message));
    }
    println!(
        "  {}",
        console::style(format!("{} messages", transcript.len())).dim()
    );
    Ok(())
}

/// Delete the transcript stored for `user`.
pub async fn clear<S: TranscriptStore>(store: &S, user: Option<&str>) -> anyhow::Result<()> {
    let key = storage_key(user);
    store.clear(&key).await?;
    tracing::info!(key = %key, "transcript cleared");
    println!(
        "  {} Chat history cleared",
        console::style("✓").green().bold()
    );
    Ok(())
}
