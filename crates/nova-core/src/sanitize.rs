//! Reply cleanup.
//!
//! The model is asked not to emit markdown, but it often does anyway. Every
//! heading, emphasis, code, quote and rule marker is stripped from the reply
//! before it reaches the client.

use std::sync::LazyLock;

use regex::Regex;

static MARKDOWN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_`>-]").expect("markdown character class is valid"));

/// Remove every `#`, `*`, `_`, `` ` ``, `>` and `-` from `reply`.
pub fn sanitize_reply(reply: &str) -> String {
    MARKDOWN_CHARS.replace_all(reply, "").into_owned()
}
