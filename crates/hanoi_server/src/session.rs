//! Game session management.
//!
//! Each session owns its own [`RoundController`], so independent
//! browser tabs or players never share a board. The manager serializes
//! all mutation of a session under one lock, which is the locking the
//! engine itself deliberately does not carry.

use hanoi_engine::RoundController;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Unique identifier for a game session.
pub type SessionId = String;

/// The session served by the un-prefixed routes; always exists.
pub const DEFAULT_SESSION: &str = "default";

/// One player's game: a session id and its round controller.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    game: RoundController,
}

impl GameSession {
    /// Creates a session reset to round 1.
    #[instrument]
    pub fn new(id: SessionId) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            game: RoundController::new(),
        }
    }

    /// The session's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read access to the game.
    pub fn game(&self) -> &RoundController {
        &self.game
    }

    /// Mutable access to the game.
    pub fn game_mut(&mut self) -> &mut RoundController {
        &mut self.game
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
}

impl SessionManager {
    /// Creates a session manager holding the default session.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        let mut sessions = HashMap::new();
        sessions.insert(
            DEFAULT_SESSION.to_string(),
            GameSession::new(DEFAULT_SESSION.to_string()),
        );
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    /// Runs `f` on the named session while holding the lock, creating
    /// the session on first use.
    ///
    /// Holding the lock across `f` means concurrent requests against
    /// one session are applied one at a time, never interleaved
    /// mid-move.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            debug!(session_id = id, "Session not found, creating on first use");
            GameSession::new(id.to_string())
        });
        f(session)
    }

    /// Lists all active session ids, sorted for stable output.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().unwrap();
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanoi_engine::{GamePhase, PegId};

    #[test]
    fn test_default_session_exists() {
        let manager = SessionManager::new();
        assert_eq!(manager.list_sessions(), vec![DEFAULT_SESSION.to_string()]);
    }

    #[test]
    fn test_sessions_created_on_first_use() {
        let manager = SessionManager::new();
        manager.with_session("alice", |session| {
            assert_eq!(session.id(), "alice");
        });

        let ids = manager.list_sessions();
        assert_eq!(ids, vec!["alice".to_string(), DEFAULT_SESSION.to_string()]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let manager = SessionManager::new();

        manager.with_session("alice", |session| {
            session.game_mut().start();
            session.game_mut().attempt_move(PegId::A, PegId::C).unwrap();
        });

        manager.with_session("bob", |session| {
            assert_eq!(session.game().phase(), GamePhase::NotStarted);
            assert_eq!(session.game().move_count(), 0);
        });

        manager.with_session("alice", |session| {
            assert_eq!(session.game().move_count(), 1);
        });
    }
}
