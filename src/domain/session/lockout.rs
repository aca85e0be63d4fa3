//! Lockout presentation resolver.
//!
//! Pure classification of an article's lock state from the requesting
//! user's point of view. No side effects; safe to call on every render
//! tick or incoming broadcast.

use chrono::Duration;

use crate::domain::foundation::{Editor, Timestamp, UserId};

use super::EditSession;

/// Which view the UI should present for an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockoutView {
    /// No live session, or the current user holds a live one.
    Editable,

    /// Another editor holds a live session; present read-only.
    LockedByOther(Editor),

    /// The current user's own session expired; re-request before editing.
    TimedOut,
}

/// Classifies the session state for `current_user` at instant `now`.
///
/// - `Editable` when no session exists, the session is another user's but
///   expired, or the current user holds a live session.
/// - `TimedOut` when the current user's own session has expired.
/// - `LockedByOther` otherwise.
pub fn resolve(
    session: Option<&EditSession>,
    current_user: &UserId,
    now: Timestamp,
    timeout: Duration,
) -> LockoutView {
    let Some(session) = session else {
        return LockoutView::Editable;
    };

    let expired = session.is_expired(now, timeout);
    match (session.is_held_by(current_user), expired) {
        (true, false) => LockoutView::Editable,
        (true, true) => LockoutView::TimedOut,
        (false, true) => LockoutView::Editable,
        (false, false) => LockoutView::LockedByOther(session.editor().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ArticleId, ChannelId, ConnectionId};

    const TIMEOUT: i64 = 600;

    fn session(user: &str, started: Timestamp) -> EditSession {
        EditSession::new(
            ArticleId::new("123").unwrap(),
            Editor::new(
                UserId::new(user).unwrap(),
                format!("Editor {}", user),
                format!("{}@example.com", user),
            ),
            ChannelId::new("editorial").unwrap(),
            ConnectionId::new(),
            started,
        )
    }

    fn timeout() -> Duration {
        Duration::seconds(TIMEOUT)
    }

    #[test]
    fn absent_session_is_editable() {
        let user = UserId::new("a").unwrap();
        let view = resolve(None, &user, Timestamp::now(), timeout());
        assert_eq!(view, LockoutView::Editable);
    }

    #[test]
    fn own_live_session_is_editable() {
        let t0 = Timestamp::from_unix_secs(1000);
        let s = session("a", t0);
        let user = UserId::new("a").unwrap();

        let view = resolve(Some(&s), &user, t0.plus_secs(10), timeout());
        assert_eq!(view, LockoutView::Editable);
    }

    #[test]
    fn own_expired_session_is_timed_out_never_editable() {
        let t0 = Timestamp::from_unix_secs(1000);
        let s = session("a", t0);
        let user = UserId::new("a").unwrap();

        let view = resolve(Some(&s), &user, t0.plus_secs(TIMEOUT as u64 + 1), timeout());
        assert_eq!(view, LockoutView::TimedOut);
    }

    #[test]
    fn other_users_live_session_is_locked() {
        let t0 = Timestamp::from_unix_secs(1000);
        let s = session("a", t0);
        let user = UserId::new("b").unwrap();

        match resolve(Some(&s), &user, t0.plus_secs(10), timeout()) {
            LockoutView::LockedByOther(holder) => assert_eq!(holder.id.as_str(), "a"),
            other => panic!("expected LockedByOther, got {:?}", other),
        }
    }

    #[test]
    fn other_users_expired_session_is_editable() {
        let t0 = Timestamp::from_unix_secs(1000);
        let s = session("a", t0);
        let user = UserId::new("b").unwrap();

        let view = resolve(Some(&s), &user, t0.plus_secs(TIMEOUT as u64 + 1), timeout());
        assert_eq!(view, LockoutView::Editable);
    }

    #[test]
    fn boundary_heartbeat_age_equal_to_timeout_is_still_live() {
        let t0 = Timestamp::from_unix_secs(1000);
        let s = session("a", t0);
        let user = UserId::new("b").unwrap();

        let view = resolve(Some(&s), &user, t0.plus_secs(TIMEOUT as u64), timeout());
        assert!(matches!(view, LockoutView::LockedByOther(_)));
    }
}
