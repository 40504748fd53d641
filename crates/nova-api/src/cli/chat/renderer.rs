//! Terminal rendering of chat messages.
//!
//! Bot replies go through `termimad`. Replies are already stripped of most
//! markdown markers by the server, but paragraphs, lists and wrapping still
//! render better than raw text.

use termimad::MadSkin;

use nova_types::chat::{ChatMessage, Sender};

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render markdown text for the terminal.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Render one transcript entry with its speaker label.
    pub fn render_message(&self, message: &ChatMessage) -> String {
        match message.from {
            Sender::User => format!(
                "{} {}\n",
                console::style("You:").green().bold(),
                message.text
            ),
            Sender::Bot => format!(
                "{}\n{}",
                console::style("Nova:").cyan().bold(),
                self.render(&message.text)
            ),
        }
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
