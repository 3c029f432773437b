use crate::errors::InternalError;
use crate::types::db::user_role::{self, ActiveModel, Entity as UserRole};
use crate::types::internal::Role;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

/// RoleStore reads and writes the identity → role lookup table
#[derive(Debug, Default)]
pub struct RoleStore {}

impl RoleStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Find the role row of an identity
    ///
    /// # Returns
    /// * `Ok(Some(Model))` - A row exists
    /// * `Ok(None)` - No role has been assigned
    /// * `Err(InternalError)` - Database error
    pub async fn find_by_user_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
    ) -> Result<Option<user_role::Model>, InternalError> {
        UserRole::find_by_id(user_id.to_owned())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_role", e))
    }

    /// Assign a role, replacing any existing one
    pub async fn assign_role(
        &self,
        conn: &impl ConnectionTrait,
        user_id: &str,
        role: Role,
    ) -> Result<user_role::Model, InternalError> {
        let now = Utc::now().timestamp();

        match self.find_by_user_id(conn, user_id).await? {
            Some(existing) => {
                let mut active_model: ActiveModel = existing.into();
                active_model.role = Set(role.as_str().to_string());
                active_model.updated_at = Set(now);

                active_model
                    .update(conn)
                    .await
                    .map_err(|e| InternalError::database("update_user_role", e))
            }
            None => {
                let new_role = ActiveModel {
                    user_id: Set(user_id.to_owned()),
                    role: Set(role.as_str().to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };

                new_role
                    .insert(conn)
                    .await
                    .map_err(|e| InternalError::database("insert_user_role", e))
            }
        }
    }

    /// Remove the role row of an identity
    ///
    /// # Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - There was nothing to remove
    pub async fn revoke_role(&self, conn: &impl ConnectionTrait, user_id: &str) -> Result<bool, InternalError> {
        let result = UserRole::delete_by_id(user_id.to_owned())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user_role", e))?;

        Ok(result.rows_affected > 0)
    }

    /// All role rows, ordered by identity id
    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<user_role::Model>, InternalError> {
        UserRole::find()
            .order_by_asc(user_role::Column::UserId)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_user_roles", e))
    }
}
