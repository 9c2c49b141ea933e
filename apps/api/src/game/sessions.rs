//! In-memory game session registry.
//!
//! Each session owns an independent `GameState`; the map lock is held only
//! for the duration of one synchronous transition, never across an await.
//! Nothing is persisted — sessions live and die with the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::game::state::GameState;

#[derive(Debug)]
pub struct GameSession {
    pub state: GameState,
    pub created_at: DateTime<Utc>,
}

/// Shared registry handle. Cheap to clone; all clones see the same sessions.
#[derive(Clone, Default)]
pub struct GameSessions {
    inner: Arc<Mutex<HashMap<Uuid, GameSession>>>,
}

impl GameSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = GameSession {
            state: GameState::new(),
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .expect("sessions lock poisoned")
            .insert(id, session);
        id
    }

    /// Runs `f` against the named session under the lock.
    /// Returns `None` when the session does not exist.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut GameSession) -> R) -> Option<R> {
        let mut sessions = self.inner.lock().expect("sessions lock poisoned");
        sessions.get_mut(&id).map(f)
    }

    pub fn count(&self) -> usize {
        self.inner.lock().expect("sessions lock poisoned").len()
    }
}
