use crate::app_data::AppData;
use crate::types::internal::Role;

pub async fn assign(app_data: &AppData, user_id: &str, role: &str) -> Result<(), Box<dyn std::error::Error>> {
    let role = Role::parse(role).ok_or_else(|| {
        format!(
            "Unknown role '{}', expected {} or {}",
            role,
            Role::SUPER_USER,
            Role::USER_GRANTED
        )
    })?;

    let row = app_data.role_store.assign_role(&app_data.db, user_id, role).await?;
    tracing::info!("Role {} assigned to {} via CLI", row.role, row.user_id);
    println!("{} is now {}", row.user_id, row.role);
    Ok(())
}

pub async fn revoke(app_data: &AppData, user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if app_data.role_store.revoke_role(&app_data.db, user_id).await? {
        tracing::info!("Role of {} revoked via CLI", user_id);
        println!("Role of {} removed; the identity is now read-only", user_id);
    } else {
        println!("{} had no role row", user_id);
    }
    Ok(())
}

pub async fn list(app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    let rows = app_data.role_store.list(&app_data.db).await?;
    if rows.is_empty() {
        println!("No roles assigned; every identity is read-only");
        return Ok(());
    }

    for row in rows {
        println!("{:<40} {}", row.user_id, row.role);
    }
    Ok(())
}
