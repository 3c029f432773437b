use crate::errors::InternalError;
use crate::errors::internal::SettingsError;
use crate::types::db::system_settings::{self, Entity as SystemSetting};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

/// SystemSettingsStore manages the named boolean flags in the database
#[derive(Debug, Default)]
pub struct SystemSettingsStore {}

impl SystemSettingsStore {
    pub fn new() -> Self {
        Self {}
    }

    /// All settings, ordered by key
    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<system_settings::Model>, InternalError> {
        SystemSetting::find()
            .order_by_asc(system_settings::Column::Key)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_system_settings", e))
    }

    pub async fn find_by_key(
        &self,
        conn: &impl ConnectionTrait,
        key: &str,
    ) -> Result<Option<system_settings::Model>, InternalError> {
        SystemSetting::find()
            .filter(system_settings::Column::Key.eq(key))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_system_setting_by_key", e))
    }

    /// Table-wide write counter
    ///
    /// Every `set_value` bumps one row's revision, so the sum changes on
    /// each write no matter which process made it.
    pub async fn revision(&self, conn: &impl ConnectionTrait) -> Result<i64, InternalError> {
        let sum: Option<Option<i64>> = SystemSetting::find()
            .select_only()
            .column_as(Expr::col(system_settings::Column::Revision).sum(), "revision")
            .into_tuple()
            .one(conn)
            .await
            .map_err(|e| InternalError::database("system_settings_revision", e))?;

        Ok(sum.flatten().unwrap_or(0))
    }

    /// Set a flag's value and record who changed it
    ///
    /// The revision is incremented in the same statement.
    ///
    /// # Returns
    /// * `Ok(Model)` - The updated row
    /// * `Err(InternalError::Settings(SettingNotFound))` - Unknown id
    /// * `Err(InternalError)` - Database error
    pub async fn set_value(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
        value: bool,
        actor_id: &str,
    ) -> Result<system_settings::Model, InternalError> {
        let result = SystemSetting::update_many()
            .col_expr(system_settings::Column::Value, Expr::value(value))
            .col_expr(system_settings::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .col_expr(system_settings::Column::UpdatedBy, Expr::value(actor_id.to_owned()))
            .col_expr(
                system_settings::Column::Revision,
                Expr::col(system_settings::Column::Revision).add(1),
            )
            .filter(system_settings::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("update_system_setting", e))?;

        if result.rows_affected == 0 {
            return Err(SettingsError::SettingNotFound(id.to_string()).into());
        }

        SystemSetting::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_updated_system_setting", e))?
            .ok_or_else(|| SettingsError::SettingNotFound(id.to_string()).into())
    }
}
