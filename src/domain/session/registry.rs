//! In-memory session registry.
//!
//! Owns the `article → session` map and enforces the at-most-one-active-
//! editor invariant. All mutations run under a single write lock, so a
//! `put` racing a `remove` or sweep either observes the live session and
//! fails with `AlreadyLocked`, or wins atomically; there is no partial
//! state where two editors both hold a lock.
//!
//! Expiry is enforced lazily here (an expired session is treated as absent
//! by `put` and `touch`) and actively by the lifecycle controller's
//! periodic sweep calling [`SessionRegistry::sweep_expired`].

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Duration;

use crate::domain::foundation::{ArticleId, ConnectionId, Timestamp, UserId};

use super::{EditSession, LockError};

/// Process-wide registry mapping articles to their active editing session.
///
/// All operations are short and never block on I/O; callers hold the lock
/// only for the duration of a map lookup or insert.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<ArticleId, EditSession>>,

    /// Heartbeat age beyond which a session counts as expired.
    heartbeat_timeout: Duration,
}

impl SessionRegistry {
    /// Creates an empty registry with the given heartbeat timeout.
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            heartbeat_timeout,
        }
    }

    /// Returns the configured heartbeat timeout.
    pub fn heartbeat_timeout(&self) -> Duration {
        self.heartbeat_timeout
    }

    /// Returns a snapshot of the article's current session, expired or not.
    ///
    /// Callers classify staleness themselves via [`resolve`]; returning the
    /// raw record keeps this side-effect free.
    ///
    /// [`resolve`]: super::resolve
    pub fn get(&self, article: &ArticleId) -> Option<EditSession> {
        self.sessions
            .read()
            .expect("registry lock poisoned")
            .get(article)
            .cloned()
    }

    /// Returns a snapshot of all non-expired sessions.
    pub fn snapshot(&self, now: Timestamp) -> Vec<EditSession> {
        self.sessions
            .read()
            .expect("registry lock poisoned")
            .values()
            .filter(|s| !s.is_expired(now, self.heartbeat_timeout))
            .cloned()
            .collect()
    }

    /// Installs a session for its article.
    ///
    /// Fails with `AlreadyLocked` when a live session held by a different
    /// user exists. An expired session, or a live one held by the same
    /// user (e.g. a re-claim after reload), is replaced.
    pub fn put(&self, session: EditSession, now: Timestamp) -> Result<(), LockError> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");

        if let Some(existing) = sessions.get(session.article()) {
            let live = !existing.is_expired(now, self.heartbeat_timeout);
            if live && !existing.is_held_by(&session.editor().id) {
                return Err(LockError::AlreadyLocked {
                    article: session.article().clone(),
                    holder: existing.editor().clone(),
                });
            }
        }

        sessions.insert(session.article().clone(), session);
        Ok(())
    }

    /// Refreshes the heartbeat of the user's session on the article.
    ///
    /// Fails with `NotOwner` when no live session held by `user` exists;
    /// an expired session is treated as already gone, so a stale tab's
    /// heartbeat cannot resurrect it.
    pub fn touch(&self, article: &ArticleId, user: &UserId, now: Timestamp) -> Result<(), LockError> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");

        match sessions.get_mut(article) {
            Some(session)
                if session.is_held_by(user) && !session.is_expired(now, self.heartbeat_timeout) =>
            {
                session.touch(now);
                Ok(())
            }
            _ => Err(LockError::NotOwner {
                article: article.clone(),
            }),
        }
    }

    /// Removes the user's session on the article.
    ///
    /// Returns the removed session, `Ok(None)` when no session exists
    /// (idempotent no-op), and `NotOwner` when the session is held by
    /// someone else.
    pub fn remove(
        &self,
        article: &ArticleId,
        user: &UserId,
    ) -> Result<Option<EditSession>, LockError> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");

        match sessions.get(article) {
            None => Ok(None),
            Some(session) if session.is_held_by(user) => Ok(sessions.remove(article)),
            Some(_) => Err(LockError::NotOwner {
                article: article.clone(),
            }),
        }
    }

    /// Removes every session opened by the given connection.
    ///
    /// Called when a WebSocket drops so no orphaned lock survives a hard
    /// disconnect. Sessions on other connections are untouched.
    pub fn remove_connection(&self, connection: &ConnectionId) -> Vec<EditSession> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");

        let dropped: Vec<ArticleId> = sessions
            .values()
            .filter(|s| s.connection() == connection)
            .map(|s| s.article().clone())
            .collect();

        dropped
            .iter()
            .filter_map(|article| sessions.remove(article))
            .collect()
    }

    /// Removes and returns all sessions whose heartbeat has expired.
    pub fn sweep_expired(&self, now: Timestamp) -> Vec<EditSession> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");

        let expired: Vec<ArticleId> = sessions
            .values()
            .filter(|s| s.is_expired(now, self.heartbeat_timeout))
            .map(|s| s.article().clone())
            .collect();

        expired
            .iter()
            .filter_map(|article| sessions.remove(article))
            .collect()
    }

    /// Number of sessions currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().expect("registry lock poisoned").len()
    }

    /// Whether the registry holds no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
