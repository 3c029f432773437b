use crate::app_data::AppData;
use crate::types::internal::context::RequestContext;

pub async fn list(app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    let rows = app_data.system_settings_store.list(&app_data.db).await?;

    for row in rows {
        println!(
            "{:>3}  {:<28} {:<5}  {}",
            row.id,
            row.key,
            row.value,
            row.description.unwrap_or_default()
        );
    }
    Ok(())
}

pub async fn set(app_data: &AppData, key: &str, value: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("settings set");
    let updated = app_data.settings_provider.update_setting_by_key(&ctx, key, value).await?;
    println!("{} = {}", updated.key, updated.value);
    Ok(())
}
