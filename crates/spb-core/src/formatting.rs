//! Outbound message texts (Telegram HTML parse mode).

use crate::domain::{PersonaState, SteamId};

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Label for a persona state. Only the online/offline distinction is shown:
/// 0 is offline, any other value counts as online.
pub fn status_label(state: PersonaState) -> &'static str {
    if state.is_online() {
        "🟢 Online"
    } else {
        "🔴 Offline"
    }
}

/// Notification sent when the tracked account's state changes.
pub fn status_change_message(display_name: &str, state: PersonaState) -> String {
    format!(
        "⚡ Account status ({}) has changed: <b>{}</b>",
        escape_html(display_name),
        status_label(state)
    )
}

/// Greeting for `/start`, listing the currently tracked id when present.
pub fn start_message(current: Option<SteamId>) -> String {
    let mut message = "Send your SteamID for tracking.".to_string();
    if let Some(id) = current {
        message.push_str(&format!("\nCurrent tracked SteamID: {id}"));
    }
    message
}

pub fn tracking_started_message() -> &'static str {
    "🔍 Tracking started"
}

pub fn tracking_canceled_message() -> &'static str {
    "⛔ Tracking canceled.\n\n🔄 Submit a new SteamID for tracking."
}

pub fn invalid_target_message() -> &'static str {
    "⚠️ Incorrect SteamID. Try again."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_special_characters() {
        assert_eq!(
            escape_html(r#"<b>&"quoted"</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn zero_state_is_offline_everything_else_online() {
        assert_eq!(status_label(PersonaState(0)), "🔴 Offline");
        assert_eq!(status_label(PersonaState(1)), "🟢 Online");
        assert_eq!(status_label(PersonaState(6)), "🟢 Online");
    }

    #[test]
    fn change_message_escapes_display_name() {
        let msg = status_change_message("<gabe>", PersonaState(1));
        assert!(msg.contains("&lt;gabe&gt;"));
        assert!(msg.contains("🟢 Online"));
    }

    #[test]
    fn start_message_mentions_current_target_only_when_tracking() {
        assert!(!start_message(None).contains("Current tracked"));

        let msg = start_message(Some(SteamId(76561197960287930)));
        assert!(msg.contains("Current tracked SteamID: 76561197960287930"));
    }
}
