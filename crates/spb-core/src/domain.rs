/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// A resolved 64-bit Steam account id (SteamID64).
///
/// Always numeric; vanity names are resolved before one of these exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SteamId(pub u64);

impl std::fmt::Display for SteamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw persona state as reported by the status backend.
///
/// Transitions are compared on the raw value; only the rendered notification
/// collapses it to the online/offline distinction (0 is offline, anything
/// else counts as online).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonaState(pub u8);

impl PersonaState {
    pub fn is_online(self) -> bool {
        self.0 != 0
    }
}
