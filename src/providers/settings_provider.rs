use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::errors::InternalError;
use crate::errors::internal::SettingsError;
use crate::stores::SystemSettingsStore;
use crate::types::db::system_settings;
use crate::types::internal::context::RequestContext;
use crate::types::internal::SettingsSnapshot;

/// Cached view over the system settings table
///
/// The cached set is tagged with the table revision it was read at and is
/// served only while that revision is current, so writes from another
/// process (the CLI) are picked up on the next read. Concurrent writers are
/// last-write-wins.
pub struct SystemSettingsProvider {
    db: DatabaseConnection,
    store: Arc<SystemSettingsStore>,
    cache: RwLock<Option<CachedSettings>>,
}

struct CachedSettings {
    revision: i64,
    snapshot: Arc<SettingsSnapshot>,
}

impl SystemSettingsProvider {
    pub fn new(db: DatabaseConnection, store: Arc<SystemSettingsStore>) -> Self {
        Self {
            db,
            store,
            cache: RwLock::new(None),
        }
    }

    /// Current settings set
    ///
    /// A failed fetch is logged and yields an empty snapshot, which reads
    /// every flag as enabled. Failures are not cached. If only the revision
    /// check fails, the cached set is served as is.
    pub async fn snapshot(&self) -> Arc<SettingsSnapshot> {
        let revision = match self.store.revision(&self.db).await {
            Ok(revision) => revision,
            Err(e) => {
                tracing::warn!("Failed to check system settings revision: {}", e);
                if let Some(cached) = self.cache.read().await.as_ref() {
                    return cached.snapshot.clone();
                }
                return self.load_uncached().await;
            }
        };

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.revision == revision {
                return cached.snapshot.clone();
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed the cache while we waited
        if let Some(cached) = cache.as_ref() {
            if cached.revision == revision {
                return cached.snapshot.clone();
            }
        }

        // The revision was read before the rows; a write in between leaves
        // the tag stale and forces another reload, never a stale hit
        match self.store.list(&self.db).await {
            Ok(entries) => {
                tracing::debug!("Loaded {} system settings at revision {}", entries.len(), revision);
                let snapshot = Arc::new(SettingsSnapshot::new(entries));
                *cache = Some(CachedSettings {
                    revision,
                    snapshot: snapshot.clone(),
                });
                snapshot
            }
            Err(e) => {
                tracing::error!("Failed to load system settings, treating all as enabled: {}", e);
                Arc::new(SettingsSnapshot::default())
            }
        }
    }

    async fn load_uncached(&self) -> Arc<SettingsSnapshot> {
        match self.store.list(&self.db).await {
            Ok(entries) => Arc::new(SettingsSnapshot::new(entries)),
            Err(e) => {
                tracing::error!("Failed to load system settings, treating all as enabled: {}", e);
                Arc::new(SettingsSnapshot::default())
            }
        }
    }

    /// Resolved value of a flag; unknown keys read as enabled
    pub async fn get_setting(&self, key: &str) -> bool {
        self.snapshot().await.get(key)
    }

    /// Persist a new value, then invalidate the cache
    ///
    /// Waits for the write to be confirmed; the cache is only dropped on
    /// success so readers never observe an unconfirmed value.
    pub async fn update_setting(
        &self,
        ctx: &RequestContext,
        id: i32,
        value: bool,
    ) -> Result<system_settings::Model, InternalError> {
        let updated = self.store.set_value(&self.db, id, value, &ctx.actor_id).await?;
        self.invalidate().await;

        tracing::info!(
            request_id = %ctx.request_id,
            source = %ctx.source,
            "System setting '{}' set to {} by {}",
            updated.key,
            updated.value,
            ctx.actor_id
        );

        Ok(updated)
    }

    /// Update a flag addressed by key (CLI convenience)
    pub async fn update_setting_by_key(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: bool,
    ) -> Result<system_settings::Model, InternalError> {
        let setting = self
            .store
            .find_by_key(&self.db, key)
            .await?
            .ok_or_else(|| SettingsError::SettingNotFound(key.to_owned()))?;

        self.update_setting(ctx, setting.id, value).await
    }

    /// Drop the cached set; the next read refetches
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}

impl std::fmt::Debug for SystemSettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSettingsProvider")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_db, test_context};
    use sea_orm::ConnectionTrait;

    async fn provider() -> (DatabaseConnection, SystemSettingsProvider, Arc<SystemSettingsStore>) {
        let db = setup_test_db().await;
        let store = Arc::new(SystemSettingsStore::new());
        let provider = SystemSettingsProvider::new(db.clone(), store.clone());
        (db, provider, store)
    }

    #[tokio::test]
    async fn test_unknown_key_reads_enabled() {
        let (_db, provider, _store) = provider().await;
        assert!(provider.get_setting("no_such_page_enabled").await);
    }

    #[tokio::test]
    async fn test_snapshot_is_reused_while_unchanged() {
        let (_db, provider, _store) = provider().await;

        let first = provider.snapshot().await;
        let second = provider.snapshot().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_write_through_another_provider_is_seen() {
        let (db, server, store) = provider().await;
        let cli = SystemSettingsProvider::new(db.clone(), store.clone());
        assert!(server.get_setting("sppg_page_enabled").await);

        cli.update_setting_by_key(&test_context("operator"), "sppg_page_enabled", false)
            .await
            .unwrap();

        assert!(!server.get_setting("sppg_page_enabled").await);

        cli.update_setting_by_key(&test_context("operator"), "sppg_page_enabled", true)
            .await
            .unwrap();
        assert!(server.get_setting("sppg_page_enabled").await);
    }

    #[tokio::test]
    async fn test_direct_store_write_is_seen() {
        let (db, provider, store) = provider().await;
        assert!(provider.get_setting("mbg_page_enabled").await);

        let row = store.find_by_key(&db, "mbg_page_enabled").await.unwrap().unwrap();
        store.set_value(&db, row.id, false, "someone").await.unwrap();

        assert!(!provider.get_setting("mbg_page_enabled").await);
    }

    #[tokio::test]
    async fn test_cached_set_survives_failed_revision_check() {
        let (db, provider, store) = provider().await;
        let row = store.find_by_key(&db, "umkm_page_enabled").await.unwrap().unwrap();
        store.set_value(&db, row.id, false, "someone").await.unwrap();
        assert!(!provider.get_setting("umkm_page_enabled").await);

        db.execute_unprepared("DROP TABLE system_settings").await.unwrap();

        assert!(!provider.get_setting("umkm_page_enabled").await);
    }

    #[tokio::test]
    async fn test_update_is_visible_to_next_read() {
        let (db, provider, store) = provider().await;
        let row = store.find_by_key(&db, "koperasi_page_enabled").await.unwrap().unwrap();
        assert!(provider.get_setting("koperasi_page_enabled").await);

        let updated = provider
            .update_setting(&test_context("admin"), row.id, false)
            .await
            .unwrap();

        assert!(!updated.value);
        assert_eq!(updated.updated_by.as_deref(), Some("admin"));
        assert!(!provider.get_setting("koperasi_page_enabled").await);
    }

    #[tokio::test]
    async fn test_update_by_unknown_key() {
        let (_db, provider, _store) = provider().await;

        let result = provider
            .update_setting_by_key(&test_context("admin"), "nope", true)
            .await;
        assert!(matches!(result, Err(InternalError::Settings(SettingsError::SettingNotFound(_)))));
    }

    #[tokio::test]
    async fn test_failed_fetch_reads_all_enabled() {
        let (db, provider, _store) = provider().await;
        db.execute_unprepared("DROP TABLE system_settings").await.unwrap();

        let snapshot = provider.snapshot().await;
        assert!(snapshot.is_empty());
        assert!(provider.get_setting("sppg_page_enabled").await);
    }
}
