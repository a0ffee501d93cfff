//! Steam Web API adapter.
//!
//! This crate implements the `spb-core` StatusSource port over the ISteamUser
//! endpoints: `GetPlayerSummaries` for presence and `ResolveVanityURL` for
//! vanity profile names.

use async_trait::async_trait;
use serde::Deserialize;

use spb_core::{
    domain::{PersonaState, SteamId},
    errors::Error,
    status::{PlayerStatus, StatusSource},
    Result,
};

const API_BASE: &str = "https://api.steampowered.com";

pub struct SteamClient {
    http: reqwest::Client,
    api_key: String,
}

impl SteamClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    fn map_err(e: reqwest::Error) -> Error {
        Error::External(format!("steam api error: {e}"))
    }
}

#[derive(Debug, Deserialize)]
struct SummariesEnvelope {
    response: SummariesResponse,
}

#[derive(Debug, Deserialize)]
struct SummariesResponse {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    personastate: Option<u8>,
    personaname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResolveEnvelope {
    response: ResolveResponse,
}

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    steamid: Option<String>,
}

#[async_trait]
impl StatusSource for SteamClient {
    async fn fetch_status(&self, target: SteamId) -> Result<Option<PlayerStatus>> {
        let url = format!("{API_BASE}/ISteamUser/GetPlayerSummaries/v0002/");
        let ids = target.to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("steamids", ids.as_str())])
            .send()
            .await
            .map_err(Self::map_err)?;

        // A non-2xx answer is an unknown tick, not an error: the polling loop
        // retries on its next tick either way.
        if !resp.status().is_success() {
            return Ok(None);
        }

        let envelope: SummariesEnvelope = resp.json().await.map_err(Self::map_err)?;
        Ok(player_status(envelope))
    }

    async fn resolve_vanity(&self, name: &str) -> Result<Option<SteamId>> {
        let url = format!("{API_BASE}/ISteamUser/ResolveVanityURL/v0001/");
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("vanityurl", name)])
            .send()
            .await
            .map_err(Self::map_err)?;

        if !resp.status().is_success() {
            return Ok(None);
        }

        let envelope: ResolveEnvelope = resp.json().await.map_err(Self::map_err)?;
        Ok(resolved_id(envelope))
    }
}

fn player_status(envelope: SummariesEnvelope) -> Option<PlayerStatus> {
    let player = envelope.response.players.into_iter().next()?;
    let state = player.personastate?;
    Some(PlayerStatus {
        state: PersonaState(state),
        display_name: player.personaname.unwrap_or_default(),
    })
}

fn resolved_id(envelope: ResolveEnvelope) -> Option<SteamId> {
    envelope.response.steamid?.parse::<u64>().ok().map(SteamId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_player_summary_into_status() {
        let envelope: SummariesEnvelope = serde_json::from_str(
            r#"{
              "response": {
                "players": [
                  {
                    "steamid": "76561197960287930",
                    "personaname": "Rabscuttle",
                    "personastate": 3,
                    "profileurl": "https://steamcommunity.com/id/GabeLoganNewell/"
                  }
                ]
              }
            }"#,
        )
        .unwrap();

        let status = player_status(envelope).unwrap();
        assert_eq!(status.state, PersonaState(3));
        assert_eq!(status.display_name, "Rabscuttle");
    }

    #[test]
    fn empty_player_list_is_unknown() {
        let envelope: SummariesEnvelope =
            serde_json::from_str(r#"{"response": {"players": []}}"#).unwrap();
        assert_eq!(player_status(envelope), None);
    }

    #[test]
    fn missing_players_field_is_unknown() {
        let envelope: SummariesEnvelope = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert_eq!(player_status(envelope), None);
    }

    #[test]
    fn missing_personastate_is_unknown() {
        let envelope: SummariesEnvelope = serde_json::from_str(
            r#"{"response": {"players": [{"personaname": "ghost"}]}}"#,
        )
        .unwrap();
        assert_eq!(player_status(envelope), None);
    }

    #[test]
    fn missing_personaname_still_yields_a_status() {
        let envelope: SummariesEnvelope = serde_json::from_str(
            r#"{"response": {"players": [{"personastate": 0}]}}"#,
        )
        .unwrap();
        let status = player_status(envelope).unwrap();
        assert_eq!(status.state, PersonaState(0));
        assert_eq!(status.display_name, "");
    }

    #[test]
    fn successful_vanity_resolution_parses_the_id() {
        let envelope: ResolveEnvelope = serde_json::from_str(
            r#"{"response": {"steamid": "76561197960287930", "success": 1}}"#,
        )
        .unwrap();
        assert_eq!(resolved_id(envelope), Some(SteamId(76561197960287930)));
    }

    #[test]
    fn no_match_resolution_is_rejected() {
        let envelope: ResolveEnvelope = serde_json::from_str(
            r#"{"response": {"success": 42, "message": "No match"}}"#,
        )
        .unwrap();
        assert_eq!(resolved_id(envelope), None);
    }

    #[test]
    fn non_numeric_steamid_is_rejected() {
        let envelope: ResolveEnvelope =
            serde_json::from_str(r#"{"response": {"steamid": "not-a-number"}}"#).unwrap();
        assert_eq!(resolved_id(envelope), None);
    }
}
