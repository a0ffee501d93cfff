use std::sync::Arc;

use teloxide::prelude::*;

use spb_core::{domain::ChatId, formatting::start_message, messaging::port::MessagingPort};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let (cmd, _args) = parse_command(text);
    let chat_id = ChatId(msg.chat.id.0);

    if cmd == "start" {
        let current = state.tracker.current_target(chat_id).await;
        let _ = state
            .messenger
            .send_html(chat_id, &start_message(current))
            .await;
    }

    Ok(())
}
