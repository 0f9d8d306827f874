//! Update Inspection
//!
//! Pure helpers that pick the two recognized control shapes out of an
//! otherwise opaque Telegram update: a `/cancel` text message, and a
//! callback query whose `data` is `cancel`. Updates are never deserialized
//! into a full schema; the queue stores them verbatim and the agent loop
//! owns their interpretation.

use serde_json::Value;

/// A cancel button press extracted from a `callback_query` update.
#[derive(Debug, PartialEq, Eq)]
pub struct CancelCallback {
    /// Callback query id, echoed back to `answerCallbackQuery`.
    pub callback_id: String,
    /// Chat the button was pressed in, as a decimal string.
    pub chat_id: String,
}

/// Chat id of a `message`-shaped object, normalized to its decimal string.
///
/// Telegram sends chat ids as JSON numbers (negative for groups); a missing
/// or malformed `chat` normalizes to the empty string, which never matches a
/// configured allow-list entry.
fn message_chat_id(message: &Value) -> String {
    match message.get("chat").and_then(|chat| chat.get("id")) {
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::String(id)) => id.clone(),
        _ => String::new(),
    }
}

/// If the update is a `/cancel` text command, the chat id it came from.
///
/// The text is matched after trimming and case-folding, so `" /CANCEL "`
/// counts.
pub fn cancel_command_chat(update: &Value) -> Option<String> {
    let message = update.get("message")?;
    let text = message.get("text")?.as_str()?;
    if text.trim().to_lowercase() == "/cancel" {
        Some(message_chat_id(message))
    } else {
        None
    }
}

/// If the update is a cancel button press, its callback id and chat id.
pub fn cancel_callback(update: &Value) -> Option<CancelCallback> {
    let callback = update.get("callback_query")?;
    if callback.get("data")?.as_str()? != "cancel" {
        return None;
    }

    let callback_id = callback
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let chat_id = callback
        .get("message")
        .map(message_chat_id)
        .unwrap_or_default();

    Some(CancelCallback {
        callback_id,
        chat_id,
    })
}
