pub mod shipments;
pub mod status;
pub mod sync;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::domain::error::PipelineError;

/// FastAPI-style error body; every non-2xx response carries `detail`.
pub(crate) type ErrorBody = (StatusCode, Json<Value>);

pub(crate) fn error_response(err: &PipelineError) -> ErrorBody {
    let status = match err {
        PipelineError::SourceNotFound(_) | PipelineError::NoMatchingRows => StatusCode::NOT_FOUND,
        PipelineError::MissingColumn(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "detail": err.to_string() })))
}

pub(crate) fn not_ready_response() -> ErrorBody {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "detail": "Los archivos aún no están inicializados. Por favor espera o sincroniza manualmente."
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn pipeline_errors_map_to_http_statuses() {
        let cases = [
            (
                PipelineError::SourceNotFound(PathBuf::from("x.xlsx")),
                StatusCode::NOT_FOUND,
            ),
            (PipelineError::NoMatchingRows, StatusCode::NOT_FOUND),
            (
                PipelineError::MissingColumn("Modelo".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PipelineError::TemplateInvalid("Tabla24".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, Json(body)) = error_response(&err);
            assert_eq!(status, expected, "{err}");
            assert!(body["detail"].is_string());
        }
    }

    #[test]
    fn not_ready_is_a_503_with_detail() {
        let (status, Json(body)) = not_ready_response();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("no están inicializados"));
    }
}
