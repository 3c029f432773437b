// Session context - the long-lived view of who is signed in
//
// One background task owns the session state. It loads the settings once,
// resolves the role on every identity change and publishes snapshots
// through a watch channel. Teardown cancels whatever fetch is in flight.

use std::sync::Arc;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::providers::{AccessGuard, RoleResolver, SystemSettingsProvider};
use crate::types::internal::{AccessDecision, GuardRequirements, Identity, Load, ResolvedRole, SessionSnapshot};

/// Session state with an explicit lifecycle
///
/// Created with [`SessionContext::initialize`] and ended with
/// [`SessionContext::teardown`]. Dropping the context also cancels the
/// background task.
pub struct SessionContext {
    state: watch::Receiver<SessionSnapshot>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SessionContext {
    /// Start tracking a session
    ///
    /// # Arguments
    /// * `auth_changes` - Current identity, updated by the auth collaborator
    /// * `role_resolver` - Consulted once per identity change
    /// * `settings` - Settings cache, read at start and on refresh
    pub fn initialize(
        auth_changes: watch::Receiver<Option<Identity>>,
        role_resolver: Arc<RoleResolver>,
        settings: Arc<SystemSettingsProvider>,
    ) -> Self {
        let (tx, state) = watch::channel(SessionSnapshot::loading());
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let worker = SessionWorker {
            auth_changes,
            role_resolver,
            settings,
            tx,
            refresh: refresh.clone(),
            cancel: cancel.clone(),
        };
        let task = tokio::spawn(worker.run());

        tracing::debug!("Session context initialized");

        Self {
            state,
            refresh,
            cancel,
            task: Some(task),
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    /// Run the guard against the latest state
    pub fn evaluate(&self, requirements: &GuardRequirements) -> AccessDecision {
        AccessGuard::evaluate(&self.state.borrow(), requirements)
    }

    /// Ask the session to refetch the settings set
    pub fn refresh_settings(&self) {
        self.refresh.notify_one();
    }

    /// Stop the session, cancelling any fetch in flight
    pub async fn teardown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Session task ended abnormally: {}", e);
            }
        }
        tracing::debug!("Session context torn down");
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &*self.state.borrow())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

struct SessionWorker {
    auth_changes: watch::Receiver<Option<Identity>>,
    role_resolver: Arc<RoleResolver>,
    settings: Arc<SystemSettingsProvider>,
    tx: watch::Sender<SessionSnapshot>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl SessionWorker {
    async fn run(mut self) {
        if !self.load_settings().await {
            return;
        }

        let identity = self.auth_changes.borrow_and_update().clone();
        if !self.apply_identity(identity).await {
            return;
        }

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                changed = self.auth_changes.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Auth source closed, session stops following identity changes");
                        break;
                    }
                    let identity = self.auth_changes.borrow_and_update().clone();
                    if !self.apply_identity(identity).await {
                        break;
                    }
                }
                _ = self.refresh.notified() => {
                    self.settings.invalidate().await;
                    if !self.load_settings().await {
                        break;
                    }
                }
            }
        }
    }

    /// Fetch settings and publish them; false when cancelled
    async fn load_settings(&self) -> bool {
        let snapshot = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            snapshot = self.settings.snapshot() => snapshot,
        };

        tracing::debug!("Session settings loaded ({} entries)", snapshot.entries().len());
        self.tx.send_modify(|state| state.settings = Load::Ready(snapshot));
        true
    }

    /// Publish a new identity and resolve its role; false when cancelled
    async fn apply_identity(&self, identity: Option<Identity>) -> bool {
        let Some(identity) = identity else {
            self.tx.send_modify(|state| {
                state.identity = Load::Ready(None);
                state.role = Load::Ready(ResolvedRole::defaulted());
            });
            tracing::debug!("Session signed out");
            return true;
        };

        let user_id = identity.user_id.clone();
        self.tx.send_modify(|state| {
            state.identity = Load::Ready(Some(identity));
            state.role = Load::Loading;
        });

        let role = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            role = self.role_resolver.resolve(&user_id) => role,
        };

        tracing::debug!("Session role for {} resolved to {}", user_id, role.role());
        self.tx.send_modify(|state| state.role = Load::Ready(role));
        true
    }
}
