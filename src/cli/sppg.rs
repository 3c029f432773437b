use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::app_data::AppData;
use crate::coordinators::SppgCoordinator;
use crate::types::internal::SppgStatus;
use crate::types::internal::context::RequestContext;

pub async fn import(app_data: &Arc<AppData>, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let input = tokio::fs::read_to_string(file).await?;
    let ctx = RequestContext::for_cli("sppg import");

    let result = coordinator(app_data).import_csv(&ctx, &input).await?;
    println!("{} imported, {} skipped (no nama_sppg)", result.imported, result.skipped);
    Ok(())
}

pub async fn export(app_data: &Arc<AppData>, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let csv = coordinator(app_data).export_csv().await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, csv).await?;
            println!("Exported to {}", path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

/// Change the status through the record update endpoint, then refetch
pub async fn set_status(app_data: &Arc<AppData>, id_sppg: &str, status: &str) -> Result<(), Box<dyn std::error::Error>> {
    let status = SppgStatus::parse(status).ok_or_else(|| format!("Unknown status '{}'", status))?;
    let cancel = interrupt_token();
    let _stop_listening = cancel.clone().drop_guard();
    let client = app_data.sppg_update_client().with_cancellation(cancel);

    let response = client.set_status(id_sppg, status).await?;
    println!("{}", response.message);

    let record = client.fetch_record(id_sppg).await?;
    println!("{} {} is now {}", record.id_sppg, record.nama_sppg, record.prog_stat);
    Ok(())
}

/// Set the reference marker through the record update endpoint, then refetch
pub async fn mark_reference(app_data: &Arc<AppData>, id_sppg: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = interrupt_token();
    let _stop_listening = cancel.clone().drop_guard();
    let client = app_data.sppg_update_client().with_cancellation(cancel);

    let response = client.set_reference_marker(id_sppg).await?;
    println!("{}", response.message);

    let record = client.fetch_record(id_sppg).await?;
    println!(
        "{} {} reff_attention = {}",
        record.id_sppg,
        record.nama_sppg,
        record.reff_attention.unwrap_or_default()
    );
    Ok(())
}

/// Token cancelled on ctrl-c, so an in-flight remote call is abandoned
/// instead of left hanging until the timeout
///
/// The listener task exits once the token is cancelled either way.
fn interrupt_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = on_interrupt.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::warn!("Failed to listen for ctrl-c: {}", e);
                    return;
                }
                tracing::info!("Interrupted, cancelling remote call");
                on_interrupt.cancel();
            }
        }
    });

    cancel
}

fn coordinator(app_data: &Arc<AppData>) -> SppgCoordinator {
    SppgCoordinator::new(Arc::clone(app_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::RemoteError;
    use crate::test::utils::setup_test_app_data;

    #[tokio::test]
    async fn test_interrupt_token_aborts_remote_call() {
        let app_data = setup_test_app_data().await;
        let cancel = interrupt_token();
        let client = app_data.sppg_update_client().with_cancellation(cancel.clone());

        cancel.cancel();

        let result = client.fetch_record("ABCDEFGH").await;
        assert!(matches!(result, Err(RemoteError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_set_status_rejects_unknown_status_before_any_call() {
        let app_data = setup_test_app_data().await;

        let result = set_status(&app_data, "ABCDEFGH", "DONE").await;
        assert!(result.is_err_and(|e| e.to_string().contains("Unknown status 'DONE'")));
    }
}
