use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::stores::RoleStore;
use crate::types::internal::{ResolvedRole, Role};

/// Classifies an identity as super user or read-only
///
/// Resolution never fails: a missing row, an unknown role string, or a
/// lookup error all resolve to the read-only default. Failures are logged.
pub struct RoleResolver {
    db: DatabaseConnection,
    role_store: Arc<RoleStore>,
}

impl RoleResolver {
    pub fn new(db: DatabaseConnection, role_store: Arc<RoleStore>) -> Self {
        Self { db, role_store }
    }

    /// Resolve the role of an identity with a single lookup
    pub async fn resolve(&self, user_id: &str) -> ResolvedRole {
        match self.role_store.find_by_user_id(&self.db, user_id).await {
            Ok(Some(row)) => match Role::parse(&row.role) {
                Some(role) => {
                    tracing::debug!("Resolved role {} for user {}", role, user_id);
                    ResolvedRole::assigned(role)
                }
                None => {
                    tracing::warn!(
                        "Unknown role '{}' for user {}, defaulting to read-only",
                        row.role,
                        user_id
                    );
                    ResolvedRole::defaulted()
                }
            },
            Ok(None) => {
                tracing::debug!("No role row for user {}, defaulting to read-only", user_id);
                ResolvedRole::defaulted()
            }
            Err(e) => {
                tracing::error!("Role lookup failed for user {}: {}", user_id, e);
                ResolvedRole::defaulted()
            }
        }
    }
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;
    use crate::types::db::user_role;
    use crate::types::internal::RoleSource;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};

    async fn resolver() -> (DatabaseConnection, RoleResolver, Arc<RoleStore>) {
        let db = setup_test_db().await;
        let store = Arc::new(RoleStore::new());
        let resolver = RoleResolver::new(db.clone(), store.clone());
        (db, resolver, store)
    }

    #[tokio::test]
    async fn test_super_user_row() {
        let (db, resolver, store) = resolver().await;
        store.assign_role(&db, "admin", Role::SuperUser).await.unwrap();

        let resolved = resolver.resolve("admin").await;

        assert!(resolved.is_super_user());
        assert!(!resolved.is_read_only());
        assert_eq!(resolved.source(), RoleSource::Assigned);
    }

    #[tokio::test]
    async fn test_missing_row_is_read_only() {
        let (_db, resolver, _store) = resolver().await;

        let resolved = resolver.resolve("nobody").await;

        assert!(!resolved.is_super_user());
        assert!(resolved.is_read_only());
        assert_eq!(resolved.source(), RoleSource::Defaulted);
    }

    #[tokio::test]
    async fn test_unknown_role_string_is_read_only() {
        let (db, resolver, _store) = resolver().await;
        user_role::ActiveModel {
            user_id: Set("odd".to_string()),
            role: Set("ADMIN".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
        }
        .insert(&db)
        .await
        .unwrap();

        let resolved = resolver.resolve("odd").await;
        assert!(resolved.is_read_only());
        assert_eq!(resolved.source(), RoleSource::Defaulted);
    }

    #[tokio::test]
    async fn test_lookup_error_is_read_only() {
        let (db, resolver, _store) = resolver().await;
        db.execute_unprepared("DROP TABLE user_roles").await.unwrap();

        let resolved = resolver.resolve("admin").await;
        assert!(resolved.is_read_only());
    }
}
