//! Robot Webhook Client
//!
//! Posts a text message envelope to the robot webhook and interprets the
//! `{errcode, errmsg}` reply. One POST per alert, no retry, transport
//! default timeouts.
//!
//! Created: 2026-10-19
//!
//! Wire format:
//!     request:  {"msgtype":"text","text":{"content":".."},"at":{"atMobiles":[],"isAtAll":true}}
//!     response: {"errcode":0,"errmsg":"ok"}

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::Notifier;

/// Default robot endpoint. The access token is a placeholder; set
/// WEBHOOK_URL (or --webhook-url) to the real robot URL.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://oapi.dingtalk.com/robot/send?access_token=REPLACE_WITH_ROBOT_TOKEN";

const MSG_TYPE_TEXT: &str = "text";

// ── Envelope ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TextMessage {
    #[serde(rename = "msgtype")]
    pub msg_type: &'static str,
    pub text: TextParams,
    pub at: AtParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextParams {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtParams {
    #[serde(rename = "atMobiles")]
    pub at_mobiles: Vec<String>,
    #[serde(rename = "isAtAll")]
    pub is_at_all: bool,
}

impl TextMessage {
    pub fn new(content: &str, mention_all: bool) -> Self {
        Self {
            msg_type: MSG_TYPE_TEXT,
            text: TextParams {
                content: content.to_string(),
            },
            at: AtParams {
                at_mobiles: Vec::new(),
                is_at_all: mention_all,
            },
        }
    }
}

/// Robot reply body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookResponse {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to serialize webhook message: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook returned an unreadable body (HTTP {status}): {source}")]
    InvalidResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("webhook rejected message: errcode={code} errmsg={message}")]
    Rejected { code: i64, message: String },
}

impl NotifyError {
    /// True when the message never got a well-formed answer from the robot.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidResponse { .. })
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Webhook notifier for the chat robot
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Endpoint without its query string (which carries the access token).
    pub fn redacted_url(&self) -> &str {
        redact(&self.url)
    }

    async fn send(&self, message: &TextMessage) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(message).map_err(NotifyError::Serialize)?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let data = response.bytes().await?;
        debug!("Webhook replied HTTP {} ({} bytes)", status, data.len());

        let reply: WebhookResponse = serde_json::from_slice(&data)
            .map_err(|source| NotifyError::InvalidResponse { status, source })?;

        if reply.errcode != 0 {
            return Err(NotifyError::Rejected {
                code: reply.errcode,
                message: reply.errmsg,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, content: &str, mention_all: bool) -> Result<(), NotifyError> {
        self.send(&TextMessage::new(content, mention_all)).await
    }
}

fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
