use std::sync::Arc;

use super::auth::Identity;
use super::role::ResolvedRole;
use super::settings::SettingsSnapshot;

/// What a protected view needs before it may render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardRequirements {
    pub require_super_user: bool,
    pub setting_key: Option<String>,
}

impl GuardRequirements {
    /// Any authenticated identity
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Authenticated, and the given setting must not be switched off
    pub fn setting(key: impl Into<String>) -> Self {
        Self {
            require_super_user: false,
            setting_key: Some(key.into()),
        }
    }

    pub fn requiring_super_user(mut self) -> Self {
        self.require_super_user = true;
        self
    }
}

/// Result of evaluating a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Identity, role or settings still being fetched; render a spinner only
    Loading,
    /// No authenticated identity
    RedirectToLogin,
    /// The page's setting is off; applies to every role
    PageUnavailable,
    /// Role is not sufficient
    AccessDenied,
    Granted,
}

impl AccessDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Loading => "loading",
            AccessDecision::RedirectToLogin => "redirect_to_login",
            AccessDecision::PageUnavailable => "page_unavailable",
            AccessDecision::AccessDenied => "access_denied",
            AccessDecision::Granted => "granted",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// A value that is either still in flight or resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Ready(T),
}

impl<T> Load<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Loading => None,
            Load::Ready(value) => Some(value),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }
}

/// Everything the guard needs to know about the current session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub identity: Load<Option<Identity>>,
    pub role: Load<ResolvedRole>,
    pub settings: Load<Arc<SettingsSnapshot>>,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            identity: Load::Loading,
            role: Load::Loading,
            settings: Load::Loading,
        }
    }

    /// Fully resolved snapshot for an anonymous caller
    pub fn anonymous(settings: Arc<SettingsSnapshot>) -> Self {
        Self {
            identity: Load::Ready(None),
            role: Load::Ready(ResolvedRole::defaulted()),
            settings: Load::Ready(settings),
        }
    }

    /// Fully resolved snapshot for an authenticated caller
    pub fn resolved(identity: Identity, role: ResolvedRole, settings: Arc<SettingsSnapshot>) -> Self {
        Self {
            identity: Load::Ready(Some(identity)),
            role: Load::Ready(role),
            settings: Load::Ready(settings),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.ready().and_then(|identity| identity.as_ref())
    }

    pub fn is_super_user(&self) -> bool {
        self.role.ready().is_some_and(|role| role.is_super_user())
    }

    /// True unless a super-user role has been confirmed
    pub fn is_read_only(&self) -> bool {
        !self.is_super_user()
    }
}
