//! Explicit per-session state store
//!
//! Replaces the implicit session-scoped dictionaries of a UI framework with
//! an injectable key-value store keyed by session id. A front-end layer
//! keeps its extracted text and last answers here across re-renders; the
//! back-end core assumes no session affinity.

use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;

/// Key-value store keyed by session id, holding JSON values
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, HashMap<String, Value>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value for a session, creating the session if needed
    pub fn set(&self, session_id: &str, key: &str, value: Value) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Get a value for a session
    pub fn get(&self, session_id: &str, key: &str) -> Option<Value> {
        self.sessions
            .get(session_id)
            .and_then(|session| session.get(key).cloned())
    }

    /// Remove a single key from a session
    pub fn remove(&self, session_id: &str, key: &str) -> Option<Value> {
        self.sessions
            .get_mut(session_id)
            .and_then(|mut session| session.remove(key))
    }

    /// Drop a whole session
    pub fn clear(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether any sessions exist
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
