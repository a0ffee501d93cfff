use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use spb_core::{
    config::Config, messaging::port::MessagingPort, status::StatusSource, tracker::Tracker,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
    pub messenger: Arc<dyn MessagingPort>,
    pub source: Arc<dyn StatusSource>,
}

pub async fn run_polling(cfg: Arc<Config>, source: Arc<dyn StatusSource>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        println!("spb started: @{}", me.username());
    }
    println!("Poll interval: {}s", cfg.poll_interval.as_secs());
    println!("Credentials file: {}", cfg.config_path.display());

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let tracker = Arc::new(Tracker::new(
        source.clone(),
        messenger.clone(),
        cfg.poll_interval,
    ));

    let state = Arc::new(AppState {
        tracker,
        messenger,
        source,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
