use crate::{domain::SteamId, status::StatusSource};

/// Outcome of validating a user-supplied tracking target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Accepted(SteamId),
    Rejected,
}

/// Validate a raw submission.
///
/// A 17-digit purely numeric string is accepted as an already-resolved
/// SteamID64 without touching the network. Anything else is treated as a
/// vanity name and resolved against the status backend. Resolution failures
/// of any kind reject the input — the caller asks the user to try again and
/// no session state is created.
pub async fn validate_target(raw: &str, source: &dyn StatusSource) -> Validation {
    let raw = raw.trim();

    if is_steam_id64(raw) {
        if let Ok(id) = raw.parse::<u64>() {
            return Validation::Accepted(SteamId(id));
        }
    }

    match source.resolve_vanity(raw).await {
        Ok(Some(id)) => Validation::Accepted(id),
        Ok(None) | Err(_) => Validation::Rejected,
    }
}

fn is_steam_id64(s: &str) -> bool {
    s.len() == 17 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PersonaState, SteamId};
    use crate::status::{PlayerStatus, StatusSource};
    use crate::{Error, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver fake: scripted answer plus a call counter.
    struct FakeResolver {
        answer: Option<SteamId>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeResolver {
        fn resolving_to(answer: Option<SteamId>) -> Self {
            Self {
                answer,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn resolve_calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for FakeResolver {
        async fn fetch_status(&self, _target: SteamId) -> Result<Option<PlayerStatus>> {
            Ok(Some(PlayerStatus {
                state: PersonaState(0),
                display_name: String::new(),
            }))
        }

        async fn resolve_vanity(&self, _name: &str) -> Result<Option<SteamId>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::External("connection reset".to_string()));
            }
            Ok(self.answer)
        }
    }

    #[tokio::test]
    async fn seventeen_digit_input_is_accepted_without_resolution() {
        let resolver = FakeResolver::resolving_to(None);
        let got = validate_target("76561197960287930", &resolver).await;
        assert_eq!(got, Validation::Accepted(SteamId(76561197960287930)));
        assert_eq!(resolver.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() {
        let resolver = FakeResolver::resolving_to(None);
        let got = validate_target("  76561197960287930\n", &resolver).await;
        assert_eq!(got, Validation::Accepted(SteamId(76561197960287930)));
    }

    #[tokio::test]
    async fn vanity_name_is_accepted_when_resolution_succeeds() {
        let resolver = FakeResolver::resolving_to(Some(SteamId(76561197960287930)));
        let got = validate_target("validUser123", &resolver).await;
        assert_eq!(got, Validation::Accepted(SteamId(76561197960287930)));
        assert_eq!(resolver.resolve_calls(), 1);
    }

    #[tokio::test]
    async fn vanity_name_is_rejected_when_nothing_resolves() {
        let resolver = FakeResolver::resolving_to(None);
        assert_eq!(validate_target("nobody", &resolver).await, Validation::Rejected);
    }

    #[tokio::test]
    async fn resolution_failure_rejects_rather_than_erroring() {
        let resolver = FakeResolver::failing();
        assert_eq!(validate_target("whoever", &resolver).await, Validation::Rejected);
    }

    #[tokio::test]
    async fn wrong_length_numeric_input_goes_through_resolution() {
        // 16 digits is not a SteamID64; it is treated as a vanity name.
        let resolver = FakeResolver::resolving_to(None);
        assert_eq!(
            validate_target("7656119796028793", &resolver).await,
            Validation::Rejected
        );
        assert_eq!(resolver.resolve_calls(), 1);
    }
}
