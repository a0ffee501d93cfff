use std::sync::Arc;

use spb_core::{config::Config, status::StatusSource};
use spb_steam::SteamClient;

#[tokio::main]
async fn main() -> Result<(), spb_core::Error> {
    spb_core::logging::init("spb")?;

    let cfg = Arc::new(Config::load()?);
    let source: Arc<dyn StatusSource> = Arc::new(SteamClient::new(cfg.steam_api_key.clone()));

    spb_telegram::router::run_polling(cfg, source)
        .await
        .map_err(|e| spb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
