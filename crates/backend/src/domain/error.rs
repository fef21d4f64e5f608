use std::path::PathBuf;
use thiserror::Error;

/// Failures of the load → dedup → join → filter → export pipeline.
///
/// Handlers translate these into HTTP statuses: missing files and empty
/// export filters are 404, a missing column is 400 (upstream schema change),
/// everything else is 500. Readiness (503) is enforced before the pipeline
/// runs and has no variant here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("archivo no encontrado: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("columna no encontrada en el archivo: {0}")]
    MissingColumn(String),

    #[error("no se encontraron datos para exportar")]
    NoMatchingRows,

    #[error("la plantilla no contiene la tabla '{0}'")]
    TemplateInvalid(String),

    #[error("error al leer hoja de cálculo: {0}")]
    SheetRead(#[from] calamine::XlsxError),

    #[error("error al generar hoja de cálculo: {0}")]
    SheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
