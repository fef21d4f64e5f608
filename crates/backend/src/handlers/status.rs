use axum::extract::State;
use axum::Json;
use contracts::api::StatusResponse;

use crate::shared::state::SharedState;

/// GET /
pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        mensaje: "API de Traducción activa".to_string(),
        archivos_inicializados: state.readiness.is_ready(),
    })
}
