//! Tracking sessions and the polling loop.
//!
//! One chat tracks at most one Steam account at a time. Each active session
//! owns a background task that polls the status backend on a fixed interval
//! and notifies the chat when the observed persona state changes. The first
//! successful observation only records a baseline and is never reported.
//!
//! Cancelling or superseding a session flips its token; the loop observes
//! that at the top of its next iteration and exits. Lifecycle operations
//! await the outgoing task, so two loops never run for the same chat.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{ChatId, PersonaState, SteamId},
    formatting::status_change_message,
    messaging::port::MessagingPort,
    status::StatusSource,
};

/// One chat's tracking state, shared between the registry and its loop task.
#[derive(Debug)]
pub struct TrackingSession {
    chat_id: ChatId,
    target: SteamId,
    cancel: CancellationToken,
    last_seen: Mutex<Option<PersonaState>>,
}

impl TrackingSession {
    fn new(chat_id: ChatId, target: SteamId) -> Self {
        Self {
            chat_id,
            target,
            cancel: CancellationToken::new(),
            last_seen: Mutex::new(None),
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn target(&self) -> SteamId {
        self.target
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Deactivate the session. Returns whether it was still active, so the
    /// caller can acknowledge exactly once.
    fn deactivate(&self) -> bool {
        let was_active = self.is_active();
        self.cancel.cancel();
        was_active
    }
}

struct SessionEntry {
    session: Arc<TrackingSession>,
    task: JoinHandle<()>,
}

/// Session lifecycle controller: an explicit registry keyed by chat id.
pub struct Tracker {
    source: Arc<dyn StatusSource>,
    messenger: Arc<dyn MessagingPort>,
    poll_interval: Duration,
    sessions: Mutex<HashMap<i64, SessionEntry>>,
}

impl Tracker {
    pub fn new(
        source: Arc<dyn StatusSource>,
        messenger: Arc<dyn MessagingPort>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            messenger,
            poll_interval,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The target currently tracked for this chat, if a session is active.
    pub async fn current_target(&self, chat_id: ChatId) -> Option<SteamId> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&chat_id.0)
            .filter(|e| e.session.is_active())
            .map(|e| e.session.target())
    }

    /// Start tracking `target` for `chat_id`, superseding any session already
    /// running for the chat. The outgoing loop is awaited before the new one
    /// spawns, so the old task can never notify after its replacement starts.
    pub async fn track(&self, chat_id: ChatId, target: SteamId) {
        let mut sessions = self.sessions.lock().await;

        if let Some(old) = sessions.remove(&chat_id.0) {
            old.session.deactivate();
            let _ = old.task.await;
        }

        let session = Arc::new(TrackingSession::new(chat_id, target));
        let task = tokio::spawn(poll_loop(
            session.clone(),
            self.source.clone(),
            self.messenger.clone(),
            self.poll_interval,
        ));
        sessions.insert(chat_id.0, SessionEntry { session, task });
    }

    /// Cancel the chat's session, if any. Idempotent: returns `true` only
    /// when an active session was actually stopped, so a repeated cancel
    /// produces no second acknowledgment.
    pub async fn cancel(&self, chat_id: ChatId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let Some(entry) = sessions.remove(&chat_id.0) else {
            return false;
        };
        let was_active = entry.session.deactivate();
        let _ = entry.task.await;
        was_active
    }
}

/// What a successful fetch did to the session's observation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    /// First successful observation; recorded silently.
    Baseline,
    /// Same state as before; nothing to report.
    Unchanged,
    /// State changed; the chat gets notified.
    Changed,
}

fn observe(last_seen: &mut Option<PersonaState>, state: PersonaState) -> Transition {
    match *last_seen {
        None => {
            *last_seen = Some(state);
            Transition::Baseline
        }
        Some(prev) if prev == state => Transition::Unchanged,
        Some(_) => {
            *last_seen = Some(state);
            Transition::Changed
        }
    }
}

async fn poll_loop(
    session: Arc<TrackingSession>,
    source: Arc<dyn StatusSource>,
    messenger: Arc<dyn MessagingPort>,
    interval: Duration,
) {
    loop {
        if !session.is_active() {
            break;
        }

        // An in-flight fetch always completes; cancellation is only honored
        // at the top of an iteration.
        match source.fetch_status(session.target()).await {
            Ok(Some(status)) => {
                let mut last_seen = session.last_seen.lock().await;
                let transition = observe(&mut last_seen, status.state);
                drop(last_seen);

                if transition == Transition::Changed {
                    let text = status_change_message(&status.display_name, status.state);
                    let _ = messenger.send_html(session.chat_id(), &text).await;
                }
            }
            // Unknown tick or transport failure: keep the last observation
            // and retry on the next tick. No counter, no backoff.
            Ok(None) | Err(_) => {}
        }

        tokio::select! {
            _ = session.cancel.cancelled() => {}
            _ = sleep(interval) => {}
        }
    }
}
