//! Telegram Bot API Client
//!
//! The one outbound call this server makes: `answerCallbackQuery`, which
//! clears the client-side loading spinner after a button press. Delivery is
//! best-effort with a short bounded timeout; the webhook response never
//! waits on Telegram.

use std::time::Duration;

use tracing::{debug, warn};

/// Client timeout for acknowledgment calls.
const ACK_TIMEOUT: Duration = Duration::from_secs(4);

/// Outbound acknowledgments toward the Telegram Bot API.
#[derive(Debug)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl TelegramNotifier {
    /// Create a notifier for the given API base and bot token.
    pub fn new(api_base: &str, bot_token: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(ACK_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!("{api_base}/bot{bot_token}/answerCallbackQuery"),
        })
    }

    /// Acknowledge a callback query, optionally with a toast text.
    ///
    /// Failures are logged and swallowed; the spinner on the client side
    /// simply times out on its own if this never lands.
    pub async fn answer_callback_query(&self, callback_query_id: &str, text: Option<&str>) {
        if callback_query_id.is_empty() {
            return;
        }

        let mut form = vec![("callback_query_id", callback_query_id)];
        if let Some(text) = text {
            form.push(("text", text));
        }

        match self.client.post(&self.endpoint).form(&form).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(callback_query_id, "Callback query answered");
            }
            Ok(resp) => {
                warn!(callback_query_id, status = %resp.status(), "answerCallbackQuery rejected");
            }
            Err(e) => {
                warn!(callback_query_id, error = %e, "answerCallbackQuery failed");
            }
        }
    }
}
