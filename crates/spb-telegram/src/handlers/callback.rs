use std::sync::Arc;

use teloxide::prelude::*;

use spb_core::{
    domain::ChatId,
    formatting::tracking_canceled_message,
    messaging::{port::MessagingPort, types::CANCEL_TRACKING_CALLBACK},
};

use crate::router::AppState;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let cb_id = q.id.clone();
    let chat_id = q.message.as_ref().map(|m| m.chat.id);
    let data = q.data.clone().unwrap_or_default();

    // Always answer the callback query, even when nothing else happens.
    let Some(chat_id) = chat_id else {
        let _ = state.messenger.answer_callback_query(&cb_id, None).await;
        return Ok(());
    };

    if data != CANCEL_TRACKING_CALLBACK {
        let _ = state.messenger.answer_callback_query(&cb_id, None).await;
        return Ok(());
    }

    let chat_id = ChatId(chat_id.0);

    // Idempotent: only the cancel that actually stopped a session is
    // acknowledged, so pressing the button twice sends one message.
    if state.tracker.cancel(chat_id).await {
        let _ = state
            .messenger
            .send_html(chat_id, tracking_canceled_message())
            .await;
    }

    let _ = state.messenger.answer_callback_query(&cb_id, None).await;
    Ok(())
}
