//! Chat Webhook Notifications
//!
//! Purpose:
//!     Deliver alert text to a DingTalk-style robot webhook and report
//!     whether the robot accepted it.
//!
//! Architecture:
//!     webhook.rs - envelope types, WebhookNotifier (reqwest), NotifyError
//!
//! Usage:
//!     The block watcher holds any `Notifier` implementation; production
//!     wiring uses `WebhookNotifier`, tests substitute a recording fake.

pub mod webhook;

use async_trait::async_trait;

pub use webhook::{NotifyError, TextMessage, WebhookNotifier, WebhookResponse};

/// Sends one alert. Implementations make exactly one delivery attempt.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, content: &str, mention_all: bool) -> Result<(), NotifyError>;
}
