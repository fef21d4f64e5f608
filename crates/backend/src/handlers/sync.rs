use axum::extract::State;
use axum::Json;
use contracts::sync::SyncReport;

use crate::shared::state::SharedState;
use crate::usecases::u501_sync_sources::sync_all;

/// POST /sync
///
/// Re-downloads every configured source. A partial failure still reports
/// what landed; readiness only flips once a sync completes in full.
pub async fn run(State(state): State<SharedState>) -> Json<SyncReport> {
    let report = sync_all(
        state.store.clone(),
        &state.config.files.sources,
        state.config.files.download_dir(),
    )
    .await;

    if report.exitoso {
        state.readiness.mark_ready();
        tracing::info!(
            "Sincronización completa: {} archivos",
            report.archivos_descargados
        );
    } else {
        tracing::warn!("Sincronización con errores: {:?}", report.errores);
    }
    Json(report)
}
