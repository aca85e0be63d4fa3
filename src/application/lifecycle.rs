//! Session lifecycle controller.
//!
//! Drives the per-article state machine `Unlocked → Locked(user) → Unlocked`
//! against the registry and publishes a delta for every transition. The
//! registry mutation always commits before the corresponding event is
//! published, and publishing is best-effort, so a slow subscriber never
//! blocks a lock transition.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::{ArticleId, ChannelId, ConnectionId, Editor, Timestamp, UserId};
use crate::domain::session::{
    EditSession, LockError, SessionEvent, SessionRegistry, StopReason,
};
use crate::ports::SessionEventPublisher;

/// Coordinates session transitions between the registry and the broadcast
/// channel.
///
/// Both collaborators are injected at construction; the controller owns no
/// state of its own.
pub struct SessionLifecycle {
    registry: Arc<SessionRegistry>,
    events: Arc<dyn SessionEventPublisher>,
}

impl SessionLifecycle {
    /// Creates a controller over the given registry and publisher.
    pub fn new(registry: Arc<SessionRegistry>, events: Arc<dyn SessionEventPublisher>) -> Self {
        Self { registry, events }
    }

    /// Returns the registry this controller mutates.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Claims an article for an editor.
    ///
    /// Succeeds when the article is unlocked (or its session expired),
    /// creating the session and broadcasting `Started` to other clients.
    /// Fails with `AlreadyLocked` when a live session by a different user
    /// exists; the caller presents the locked view and never overrides.
    pub async fn start_editing(
        &self,
        article: ArticleId,
        editor: Editor,
        channel: ChannelId,
        connection: ConnectionId,
    ) -> Result<EditSession, LockError> {
        let now = Timestamp::now();
        let session = EditSession::new(article, editor, channel, connection, now);

        self.registry.put(session.clone(), now)?;

        tracing::info!(
            article = %session.article(),
            editor = %session.editor().id,
            connection_id = %connection,
            "editing session started"
        );

        self.events
            .publish(SessionEvent::Started(session.clone()), Some(connection))
            .await;

        Ok(session)
    }

    /// Refreshes the expiry clock of the user's session.
    ///
    /// Fails with `NotOwner` when the user no longer holds the article,
    /// including when their own session has already expired; the client
    /// should re-request the lock.
    pub async fn heartbeat(&self, article: &ArticleId, user: &UserId) -> Result<(), LockError> {
        self.registry.touch(article, user, Timestamp::now())
    }

    /// Releases the user's claim on an article.
    ///
    /// Idempotent: releasing an article with no session is a silent no-op
    /// and publishes nothing. Broadcasts `Stopped` only when a session was
    /// actually removed.
    pub async fn stop_editing(
        &self,
        article: &ArticleId,
        user: &UserId,
        connection: Option<ConnectionId>,
    ) -> Result<(), LockError> {
        let removed = self.registry.remove(article, user)?;

        if removed.is_some() {
            tracing::info!(article = %article, editor = %user, "editing session stopped");
            self.events
                .publish(
                    SessionEvent::Stopped {
                        article: article.clone(),
                        reason: StopReason::Stopped,
                    },
                    connection,
                )
                .await;
        }

        Ok(())
    }

    /// Releases every session held by a dropped connection.
    ///
    /// Called by the transport when a WebSocket closes, so no orphaned
    /// lock survives a hard disconnect.
    pub async fn on_disconnect(&self, connection: &ConnectionId) {
        for session in self.registry.remove_connection(connection) {
            tracing::info!(
                article = %session.article(),
                editor = %session.editor().id,
                connection_id = %connection,
                "editing session released on disconnect"
            );
            self.events
                .publish(
                    SessionEvent::Stopped {
                        article: session.article().clone(),
                        reason: StopReason::Disconnected,
                    },
                    None,
                )
                .await;
        }
    }

    /// Removes expired sessions and broadcasts a `Stopped` for each.
    ///
    /// Exposed separately from the periodic loop so tests can drive the
    /// sweep with a synthetic clock.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let expired = self.registry.sweep_expired(now);
        let count = expired.len();

        for session in expired {
            tracing::info!(
                article = %session.article(),
                editor = %session.editor().id,
                "editing session expired"
            );
            self.events
                .publish(
                    SessionEvent::Stopped {
                        article: session.article().clone(),
                        reason: StopReason::Expired,
                    },
                    None,
                )
                .await;
        }

        count
    }

    /// Runs the periodic sweep until the shutdown signal flips to `true`.
    ///
    /// Crashed clients that never sent a disconnect release their locks
    /// within one sweep interval plus the heartbeat timeout.
    pub async fn run_sweeper(
        &self,
        interval: std::time::Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = time::interval(interval);
        // The first tick fires immediately; skip it so a fresh process
        // does not sweep before any client had a chance to heartbeat.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("session sweeper stopping");
                        return;
                    }
                }
                _ = ticker.tick() => {
                    let removed = self.sweep(Timestamp::now()).await;
                    if removed > 0 {
                        tracing::debug!(removed, "session sweep removed expired sessions");
                    }
                }
            }
        }
    }
}
