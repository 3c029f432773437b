use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::errors::InternalError;
use crate::errors::internal::SppgError;
use crate::stores::{SppgStore, SppgWorkflowUpdate};
use crate::types::db::sppg;
use crate::types::internal::SppgStatus;
use crate::types::internal::context::RequestContext;

/// Fixed code written by the reference-marker action
pub const REFERENCE_MARKER: &str = "ATTENTION";

/// Status and reference-marker changes on SPPG records
///
/// Any status may move to any other status. Changes are written in a single
/// update and the stored row is returned, so callers always see the
/// authoritative post-write state.
pub struct StatusWorkflow {
    db: DatabaseConnection,
    sppg_store: Arc<SppgStore>,
}

impl StatusWorkflow {
    pub fn new(db: DatabaseConnection, sppg_store: Arc<SppgStore>) -> Self {
        Self { db, sppg_store }
    }

    /// Move a record to a new status
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id_sppg: &str,
        status: SppgStatus,
    ) -> Result<sppg::Model, InternalError> {
        self.apply(
            ctx,
            id_sppg,
            SppgWorkflowUpdate {
                prog_stat: Some(status),
                reff_attention: None,
            },
        )
        .await
    }

    /// Tag a record with the reference marker, leaving its status alone
    pub async fn set_reference_marker(
        &self,
        ctx: &RequestContext,
        id_sppg: &str,
    ) -> Result<sppg::Model, InternalError> {
        self.apply(
            ctx,
            id_sppg,
            SppgWorkflowUpdate {
                prog_stat: None,
                reff_attention: Some(REFERENCE_MARKER.to_string()),
            },
        )
        .await
    }

    /// Apply the raw fields of an update request
    ///
    /// Blank strings count as absent. At least one field must remain.
    pub async fn apply_raw(
        &self,
        ctx: &RequestContext,
        id_sppg: &str,
        prog_stat: Option<&str>,
        reff_attention: Option<&str>,
    ) -> Result<sppg::Model, InternalError> {
        let prog_stat = match prog_stat.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(SppgStatus::parse(raw).ok_or_else(|| SppgError::UnknownStatus(raw.to_owned()))?),
            None => None,
        };

        let reff_attention = reff_attention
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        self.apply(
            ctx,
            id_sppg,
            SppgWorkflowUpdate {
                prog_stat,
                reff_attention,
            },
        )
        .await
    }

    async fn apply(
        &self,
        ctx: &RequestContext,
        id_sppg: &str,
        update: SppgWorkflowUpdate,
    ) -> Result<sppg::Model, InternalError> {
        if update.prog_stat.is_none() && update.reff_attention.is_none() {
            return Err(SppgError::EmptyUpdate.into());
        }

        let current = self.sppg_store.get(&self.db, id_sppg).await?;
        let previous = SppgStatus::from_stored(current.prog_stat.as_deref());

        let updated = self.sppg_store.update_workflow(&self.db, id_sppg, update).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = %ctx.source,
            "SPPG {} updated by {}: status {} -> {}, reff_attention {:?}",
            id_sppg,
            ctx.actor_id,
            previous,
            SppgStatus::from_stored(updated.prog_stat.as_deref()),
            updated.reff_attention
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::NewSppg;
    use crate::test::utils::{setup_test_db, test_context};

    async fn workflow_with_record() -> StatusWorkflow {
        let db = setup_test_db().await;
        let store = Arc::new(SppgStore::new());
        store
            .insert(
                &db,
                NewSppg {
                    id_sppg: "ABCDEFGH".to_string(),
                    nama_sppg: "SPPG Bogor".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        StatusWorkflow::new(db, store)
    }

    #[tokio::test]
    async fn test_any_status_can_follow_any_other() {
        let workflow = workflow_with_record().await;
        let ctx = test_context("admin");

        for status in [
            SppgStatus::Reject,
            SppgStatus::Approved,
            SppgStatus::PendingUpdate,
            SppgStatus::ApprovedKuota,
            SppgStatus::OnHold,
        ] {
            let updated = workflow.set_status(&ctx, "ABCDEFGH", status).await.unwrap();
            assert_eq!(SppgStatus::from_stored(updated.prog_stat.as_deref()), status);
        }
    }

    #[tokio::test]
    async fn test_reference_marker_leaves_status() {
        let workflow = workflow_with_record().await;
        let ctx = test_context("admin");
        workflow.set_status(&ctx, "ABCDEFGH", SppgStatus::Approved).await.unwrap();

        let updated = workflow.set_reference_marker(&ctx, "ABCDEFGH").await.unwrap();

        assert_eq!(updated.reff_attention.as_deref(), Some(REFERENCE_MARKER));
        assert_eq!(updated.prog_stat.as_deref(), Some("APPROVED"));
    }

    #[tokio::test]
    async fn test_apply_raw_rejects_unknown_status_without_writing() {
        let workflow = workflow_with_record().await;
        let ctx = test_context("admin");

        let result = workflow
            .apply_raw(&ctx, "ABCDEFGH", Some("DONE"), Some("ATTENTION"))
            .await;
        assert!(matches!(result, Err(InternalError::Sppg(SppgError::UnknownStatus(_)))));

        let stored = workflow.sppg_store.get(&workflow.db, "ABCDEFGH").await.unwrap();
        assert_eq!(stored.reff_attention, None);
    }

    #[tokio::test]
    async fn test_apply_raw_blank_fields_are_empty_update() {
        let workflow = workflow_with_record().await;

        let result = workflow
            .apply_raw(&test_context("admin"), "ABCDEFGH", Some("  "), None)
            .await;
        assert!(matches!(result, Err(InternalError::Sppg(SppgError::EmptyUpdate))));
    }

    #[tokio::test]
    async fn test_unknown_record() {
        let workflow = workflow_with_record().await;

        let result = workflow
            .set_status(&test_context("admin"), "ZZZZZZZZ", SppgStatus::Approved)
            .await;
        assert!(matches!(result, Err(InternalError::Sppg(SppgError::RecordNotFound(_)))));
    }
}
