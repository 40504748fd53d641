//! HTTP client for a running relay server.

use anyhow::Context;
use reqwest::header::SET_COOKIE;

use nova_types::chat::{BotReply, BotRequest, LogoutResponse};

/// Talks to `POST /bot` and `POST /logout`. The session cookie the server
/// hands out lives in the client's cookie jar.
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    has_session: bool,
}

impl BotClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            has_session: false,
        })
    }

    /// Send one message and return the server's reply text.
    ///
    /// Any transport failure or non-2xx status is an error.
    pub async fn send(&mut self, message: &str) -> anyhow::Result<String> {
        let body = BotRequest {
            message: message.to_string(),
        };
        let response = self
            .request(&format!("{}/bot", self.base_url))
            .json(&body)
            .send()
            .await
            .context("request to relay failed")?
            .error_for_status()
            .context("relay returned an error status")?;

        if response.headers().contains_key(SET_COOKIE) {
            self.has_session = true;
        }

        let reply: BotReply = response.json().await.context("invalid reply body")?;
        Ok(reply.reply)
    }

    /// End the server session, if one was opened.
    pub async fn logout(&mut self) -> anyhow::Result<bool> {
        if !self.has_session {
            return Ok(false);
        }
        let response: LogoutResponse = self
            .request(&format!("{}/logout", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        self.has_session = false;
        Ok(response.success)
    }

    #[cfg(test)]
    pub fn has_session(&self) -> bool {
        self.has_session
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}
