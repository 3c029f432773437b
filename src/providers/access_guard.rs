use crate::types::internal::{AccessDecision, GuardRequirements, SessionSnapshot};

/// Decides whether a protected view may render
///
/// Rules are checked in order and the first match wins:
///
/// 1. identity, role or settings still loading → `Loading`
/// 2. no identity → `RedirectToLogin`
/// 3. required setting is off → `PageUnavailable` (for every role)
/// 4. super user required but not held → `AccessDenied`
/// 5. otherwise → `Granted`
///
/// The setting check precedes the role check so a switched-off page stays
/// off for super users as well.
pub struct AccessGuard;

impl AccessGuard {
    pub fn evaluate(session: &SessionSnapshot, requirements: &GuardRequirements) -> AccessDecision {
        let (identity, settings) = match (session.identity.ready(), session.settings.ready()) {
            (Some(identity), Some(settings)) => (identity, settings),
            _ => return AccessDecision::Loading,
        };

        let Some(_identity) = identity else {
            return AccessDecision::RedirectToLogin;
        };

        // Never gate on a role that is not known yet
        let Some(role) = session.role.ready() else {
            return AccessDecision::Loading;
        };

        if let Some(key) = requirements.setting_key.as_deref() {
            if !settings.get(key) {
                return AccessDecision::PageUnavailable;
            }
        }

        if requirements.require_super_user && !role.is_super_user() {
            return AccessDecision::AccessDenied;
        }

        AccessDecision::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::system_settings;
    use crate::types::internal::{Identity, Load, ResolvedRole, Role, SettingsSnapshot};
    use std::sync::Arc;

    fn settings(entries: &[(&str, bool)]) -> Arc<SettingsSnapshot> {
        Arc::new(SettingsSnapshot::new(
            entries
                .iter()
                .enumerate()
                .map(|(i, (key, value))| system_settings::Model {
                    id: i as i32 + 1,
                    key: key.to_string(),
                    value: *value,
                    description: None,
                    updated_at: 0,
                    updated_by: None,
                    revision: 0,
                })
                .collect(),
        ))
    }

    fn session(role: ResolvedRole, settings: Arc<SettingsSnapshot>) -> SessionSnapshot {
        SessionSnapshot::resolved(Identity::new("user-1"), role, settings)
    }

    fn sppg_requirements() -> GuardRequirements {
        GuardRequirements::setting("sppg_page_enabled")
    }

    #[test]
    fn test_loading_while_anything_is_in_flight() {
        let requirements = sppg_requirements();
        assert_eq!(
            AccessGuard::evaluate(&SessionSnapshot::loading(), &requirements),
            AccessDecision::Loading
        );

        let mut snapshot = session(ResolvedRole::assigned(Role::SuperUser), settings(&[]));
        snapshot.settings = Load::Loading;
        assert_eq!(AccessGuard::evaluate(&snapshot, &requirements), AccessDecision::Loading);

        let mut snapshot = session(ResolvedRole::assigned(Role::SuperUser), settings(&[]));
        snapshot.role = Load::Loading;
        assert_eq!(AccessGuard::evaluate(&snapshot, &requirements), AccessDecision::Loading);
    }

    #[test]
    fn test_anonymous_is_redirected_to_login() {
        let snapshot = SessionSnapshot::anonymous(settings(&[("sppg_page_enabled", false)]));
        assert_eq!(
            AccessGuard::evaluate(&snapshot, &sppg_requirements()),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_disabled_setting_denies_every_role_identically() {
        let flags = settings(&[("sppg_page_enabled", false)]);
        let requirements = sppg_requirements();

        let super_user = session(ResolvedRole::assigned(Role::SuperUser), flags.clone());
        let granted = session(ResolvedRole::assigned(Role::UserGranted), flags.clone());
        let defaulted = session(ResolvedRole::defaulted(), flags);

        for snapshot in [super_user, granted, defaulted] {
            assert_eq!(
                AccessGuard::evaluate(&snapshot, &requirements),
                AccessDecision::PageUnavailable
            );
        }
    }

    #[test]
    fn test_disabled_setting_wins_over_role_check() {
        let snapshot = session(
            ResolvedRole::assigned(Role::UserGranted),
            settings(&[("sppg_page_enabled", false)]),
        );
        let requirements = sppg_requirements().requiring_super_user();

        assert_eq!(
            AccessGuard::evaluate(&snapshot, &requirements),
            AccessDecision::PageUnavailable
        );
    }

    #[test]
    fn test_super_user_requirement_denies_user_granted() {
        let snapshot = session(ResolvedRole::assigned(Role::UserGranted), settings(&[]));
        let requirements = GuardRequirements::authenticated().requiring_super_user();

        assert_eq!(
            AccessGuard::evaluate(&snapshot, &requirements),
            AccessDecision::AccessDenied
        );
    }

    #[test]
    fn test_missing_setting_key_is_enabled() {
        let snapshot = session(ResolvedRole::defaulted(), settings(&[]));
        assert_eq!(
            AccessGuard::evaluate(&snapshot, &sppg_requirements()),
            AccessDecision::Granted
        );
    }

    #[test]
    fn test_super_user_with_enabled_setting_is_granted() {
        let snapshot = session(
            ResolvedRole::assigned(Role::SuperUser),
            settings(&[("sppg_page_enabled", true)]),
        );
        let requirements = sppg_requirements().requiring_super_user();

        assert_eq!(AccessGuard::evaluate(&snapshot, &requirements), AccessDecision::Granted);
    }
}
