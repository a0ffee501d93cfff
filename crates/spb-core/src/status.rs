use async_trait::async_trait;

use crate::{
    domain::{PersonaState, SteamId},
    Result,
};

/// A tracked account's presence as reported by the status backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatus {
    pub state: PersonaState,
    pub display_name: String,
}

/// Port for the presence backend (Steam Web API is the first implementation).
///
/// `fetch_status` returning `Ok(None)` means "unknown for this tick": the
/// backend answered but had no usable record. Transport failures surface as
/// errors; the polling loop treats both the same way.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, target: SteamId) -> Result<Option<PlayerStatus>>;

    /// Resolve a vanity profile name to a SteamID64, if the backend knows it.
    async fn resolve_vanity(&self, name: &str) -> Result<Option<SteamId>>;
}
