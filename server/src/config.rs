//! Server Configuration
//!
//! Loads configuration from environment variables. Every optional feature of
//! the receiver (secret verification, queue locking, wakeup pipe,
//! cancellation, upstream acknowledgments, chat allow-list) is gated by its
//! own variable: leaving the variable unset keeps the default, setting it to
//! an empty string disables the feature.

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// Default Telegram Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1:8787")
    pub bind_address: String,

    /// Shared secret compared against `X-Telegram-Bot-Api-Secret-Token`
    /// (`None` = secret verification disabled)
    pub webhook_secret: Option<String>,

    /// Telegram bot token for callback acknowledgments
    /// (`None` = acknowledgments disabled)
    pub bot_token: Option<String>,

    /// Chat id allowed to issue privileged commands
    /// (`None` = fail-open: every chat is privileged)
    pub allowed_chat_id: Option<String>,

    /// Telegram Bot API base URL (overridable for tests / self-hosted API)
    pub telegram_api_base: String,

    /// Append-only queue log of received updates
    pub queue_path: PathBuf,

    /// Lock file guarding queue appends (`None` = unlocked appends)
    pub queue_lock_path: Option<PathBuf>,

    /// FIFO used to nudge the agent loop (`None` = wakeup disabled)
    pub wakeup_fifo_path: Option<PathBuf>,

    /// Sentinel file whose presence requests cancellation
    /// (`None` = cancellation disabled)
    pub cancel_sentinel_path: Option<PathBuf>,

    /// Pid file of the agent process, written externally
    /// (`None` = the SIGTERM step of cancellation is skipped)
    pub agent_pid_path: Option<PathBuf>,
}

/// Read an optional variable; unset, empty, or whitespace-only means `None`.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a path variable with a default; unset means the default, an empty
/// value disables the feature the path belongs to.
fn optional_path(key: &str, default: &str) -> Option<PathBuf> {
    match env::var(key) {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(PathBuf::from(v)),
        Err(_) => Some(PathBuf::from(default)),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let queue_path = match env::var("QUEUE_PATH") {
            Ok(v) if v.trim().is_empty() => bail!("QUEUE_PATH must not be empty"),
            Ok(v) => PathBuf::from(v),
            Err(_) => PathBuf::from("runtime/webhook_updates.jsonl"),
        };

        Ok(Self {
            bind_address: env::var("WEBHOOK_BIND").unwrap_or_else(|_| "127.0.0.1:8787".into()),
            webhook_secret: optional("WEBHOOK_SECRET"),
            bot_token: optional("TELEGRAM_BOT_TOKEN"),
            allowed_chat_id: optional("TELEGRAM_CHAT_ID"),
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
            queue_path,
            queue_lock_path: optional_path("QUEUE_LOCK_PATH", "runtime/webhook_queue.lock"),
            wakeup_fifo_path: optional_path("WAKEUP_FIFO_PATH", "runtime/webhook_notify.fifo"),
            cancel_sentinel_path: optional_path("CANCEL_SENTINEL_PATH", "runtime/cancel"),
            agent_pid_path: optional_path("AGENT_PID_PATH", "runtime/agent.pid"),
        })
    }

    /// Check if secret verification is enabled.
    #[must_use]
    pub const fn has_secret(&self) -> bool {
        self.webhook_secret.is_some()
    }

    /// Check if the wakeup pipe is enabled.
    #[must_use]
    pub const fn has_wakeup(&self) -> bool {
        self.wakeup_fifo_path.is_some()
    }

    /// Check if cancellation signaling is enabled.
    #[must_use]
    pub const fn has_cancellation(&self) -> bool {
        self.cancel_sentinel_path.is_some()
    }

    /// Check if upstream callback acknowledgments are enabled.
    #[must_use]
    pub const fn has_bot_token(&self) -> bool {
        self.bot_token.is_some()
    }

    /// Create a default configuration for testing.
    ///
    /// All features on, no secret, no allow-list, paths under `runtime/`.
    /// Tests override the paths to point into a temp directory.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:0".into(),
            webhook_secret: None,
            bot_token: None,
            allowed_chat_id: None,
            telegram_api_base: DEFAULT_API_BASE.into(),
            queue_path: "runtime/webhook_updates.jsonl".into(),
            queue_lock_path: Some("runtime/webhook_queue.lock".into()),
            wakeup_fifo_path: Some("runtime/webhook_notify.fifo".into()),
            cancel_sentinel_path: Some("runtime/cancel".into()),
            agent_pid_path: Some("runtime/agent.pid".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_for_test_enables_all_features() {
        let config = Config::default_for_test();
        assert!(!config.has_secret());
        assert!(config.has_wakeup());
        assert!(config.has_cancellation());
        assert!(!config.has_bot_token());
    }
}
