use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use contracts::api::{DataResponse, ShipmentQuery};

use super::{error_response, not_ready_response, ErrorBody};
use crate::shared::state::SharedState;
use crate::usecases::{u502_shipment_query, u503_export_workbook};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /data?type=embarque|waybill&value=...
pub async fn data(
    State(state): State<SharedState>,
    Query(query): Query<ShipmentQuery>,
) -> Result<Json<DataResponse>, ErrorBody> {
    if !state.readiness.is_ready() {
        return Err(not_ready_response());
    }
    match u502_shipment_query::executor::run(&state.config, query.mode, &query.value) {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            tracing::error!("Consulta fallida ({}={}): {e}", query.mode.as_str(), query.value);
            Err(error_response(&e))
        }
    }
}

/// POST /export?type=embarque|waybill&value=...
///
/// The workbook is built per request and streamed back as an attachment;
/// no artifact is left on disk.
pub async fn export(
    State(state): State<SharedState>,
    Query(query): Query<ShipmentQuery>,
) -> Result<impl IntoResponse, ErrorBody> {
    if !state.readiness.is_ready() {
        return Err(not_ready_response());
    }
    let bytes = u503_export_workbook::executor::run(&state.config, query.mode, &query.value)
        .map_err(|e| {
            tracing::error!(
                "Exportación fallida ({}={}): {e}",
                query.mode.as_str(),
                query.value
            );
            error_response(&e)
        })?;

    let filename = format!(
        "Validacion_{}_{}.xlsx",
        query.mode.as_str(),
        sanitize(&query.value)
    );
    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}

/// Keeps the filter value usable inside a Content-Disposition filename.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
