//! Per-user session state: thread id, last seen message, and agent variant.
//!
//! The store is injected into the router rather than held as process-wide
//! state. It is in-process only; a restart loses all user-to-thread bindings
//! (conversation content stays recoverable by thread id in the checkpoint
//! store, but the router can no longer locate it without a new /start).

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use agent::AgentVariant;
use chrono::{DateTime, Utc};

/// One user's active conversation binding.
#[derive(Debug, Clone)]
pub struct Session {
    pub thread_id: String,
    pub last_message_id: i32,
    pub variant: AgentVariant,
    /// Transport id of an outstanding clear-confirmation prompt.
    pub pending_clear_confirm: Option<i32>,
    /// True while a bulk deletion runs for this user.
    pub clearing: Arc<AtomicBool>,
    /// Set to stop an in-flight bulk deletion for this user.
    pub clear_cancel: Arc<AtomicBool>,
}

impl Session {
    fn new(thread_id: String, last_message_id: i32, variant: AgentVariant) -> Self {
        Self {
            thread_id,
            last_message_id,
            variant,
            pending_clear_confirm: None,
            clearing: Arc::new(AtomicBool::new(false)),
            clear_cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Derives a fresh thread id from user identity and creation time. Ids are
/// never reused: a new dialog always gets a new timestamp.
pub fn new_thread_id(user_id: i64, now: DateTime<Utc>) -> String {
    format!("{}_{}", user_id, now.timestamp_millis())
}

/// Mutex-guarded map from user id to [`Session`]. Writes are plain replaces;
/// the lock is held only for the map operation, never across awaits.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the user's session with a fresh thread for `variant`.
    /// Returns the new thread id. Any previous thread id is abandoned.
    pub fn begin(
        &self,
        user_id: i64,
        variant: AgentVariant,
        now: DateTime<Utc>,
        last_message_id: i32,
    ) -> String {
        let thread_id = new_thread_id(user_id, now);
        let session = Session::new(thread_id.clone(), last_message_id, variant);
        self.inner.lock().unwrap().insert(user_id, session);
        thread_id
    }

    /// Returns the user's session, creating a Default-variant one when absent.
    /// The boolean is true when a session was created by this call.
    pub fn ensure(&self, user_id: i64, now: DateTime<Utc>, last_message_id: i32) -> (Session, bool) {
        let mut map = self.inner.lock().unwrap();
        match map.get(&user_id) {
            Some(session) => (session.clone(), false),
            None => {
                let session = Session::new(
                    new_thread_id(user_id, now),
                    last_message_id,
                    AgentVariant::Default,
                );
                map.insert(user_id, session.clone());
                (session, true)
            }
        }
    }

    pub fn get(&self, user_id: i64) -> Option<Session> {
        self.inner.lock().unwrap().get(&user_id).cloned()
    }

    /// Fail-forward after an agent error: the user keeps their variant but
    /// gets a fresh thread, so one bad turn cannot wedge the conversation.
    pub fn rotate_thread(&self, user_id: i64, now: DateTime<Utc>) -> Option<String> {
        let mut map = self.inner.lock().unwrap();
        map.get_mut(&user_id).map(|session| {
            session.thread_id = new_thread_id(user_id, now);
            session.thread_id.clone()
        })
    }

    pub fn set_last_message(&self, user_id: i64, message_id: i32) {
        if let Some(session) = self.inner.lock().unwrap().get_mut(&user_id) {
            session.last_message_id = message_id;
        }
    }

    pub fn set_pending_clear(&self, user_id: i64, confirm_message_id: i32) {
        if let Some(session) = self.inner.lock().unwrap().get_mut(&user_id) {
            session.pending_clear_confirm = Some(confirm_message_id);
        }
    }

    /// Clears and returns the outstanding confirmation prompt id, if any.
    pub fn take_pending_clear(&self, user_id: i64) -> Option<i32> {
        self.inner
            .lock()
            .unwrap()
            .get_mut(&user_id)
            .and_then(|session| session.pending_clear_confirm.take())
    }
}
