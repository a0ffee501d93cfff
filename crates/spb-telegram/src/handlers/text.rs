use std::sync::Arc;

use teloxide::prelude::*;

use spb_core::{
    domain::ChatId,
    formatting::{invalid_target_message, tracking_started_message},
    messaging::{port::MessagingPort, types::InlineKeyboard},
    validate::{validate_target, Validation},
};

use crate::router::AppState;

/// Free-text messages are tracking-target submissions: a SteamID64 or a
/// vanity profile name.
pub async fn handle_text(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let submitted = text.trim();
    if submitted.is_empty() {
        return Ok(());
    }

    let chat_id = ChatId(msg.chat.id.0);

    match validate_target(submitted, state.source.as_ref()).await {
        Validation::Accepted(target) => {
            // Supersedes any session already running for this chat.
            state.tracker.track(chat_id, target).await;
            let _ = state
                .messenger
                .send_inline_keyboard(
                    chat_id,
                    tracking_started_message(),
                    InlineKeyboard::cancel_tracking(),
                )
                .await;
        }
        Validation::Rejected => {
            let _ = state
                .messenger
                .send_html(chat_id, invalid_target_message())
                .await;
        }
    }

    Ok(())
}
