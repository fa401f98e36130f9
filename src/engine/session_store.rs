//! Per-session tracking state and its CRUD store.
//!
//! One GPS stream feeds one session; a session owns its path tracker
//! and configuration exclusively, so sessions never share mutable
//! state. Callers that parallelize across sessions must give each
//! session its own exclusive-access boundary.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path::PathTracker;
use crate::TrackConfig;

/// Tracking state for one walking session.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub id: String,
    pub config: TrackConfig,
    pub tracker: PathTracker,
}

impl TrackingSession {
    /// Create a fresh session with an empty path.
    pub fn new(id: impl Into<String>, config: TrackConfig) -> Self {
        Self {
            id: id.into(),
            config,
            tracker: PathTracker::new(),
        }
    }
}

/// Storage for active tracking sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, TrackingSession>,
}

impl SessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Register a new session.
    ///
    /// Fails with [`Error::SessionExists`] if the id is already
    /// tracked - restarting a walk goes through reset, not re-create.
    pub fn create(&mut self, id: &str, config: TrackConfig) -> Result<()> {
        if self.sessions.contains_key(id) {
            return Err(Error::SessionExists {
                session_id: id.to_string(),
            });
        }
        self.sessions
            .insert(id.to_string(), TrackingSession::new(id, config));
        Ok(())
    }

    /// Get a session by id.
    pub fn get(&self, id: &str) -> Option<&TrackingSession> {
        self.sessions.get(id)
    }

    /// Get a mutable session by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut TrackingSession> {
        self.sessions.get_mut(id)
    }

    /// Remove a session, returning its final state if it existed.
    pub fn remove(&mut self, id: &str) -> Option<TrackingSession> {
        self.sessions.remove(id)
    }

    /// Check if a session exists.
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// All session ids.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.sessions.keys()
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop all sessions.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}
