use serde::{Deserialize, Serialize};

/// A remote file the synchronizer must mirror locally: the document-store
/// item id plus the fixed local name the pipeline expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub unique_id: String,
    pub nombre: String,
}

/// Outcome of one synchronization pass. Per-file failures are collected
/// independently; `exitoso` requires every configured file to have landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub exitoso: bool,
    pub archivos_descargados: usize,
    pub total_archivos: usize,
    pub errores: Vec<String>,
}

impl SyncReport {
    /// Report for a failure that happened before any file was attempted.
    pub fn aborted(total_archivos: usize, error: String) -> Self {
        Self {
            exitoso: false,
            archivos_descargados: 0,
            total_archivos,
            errores: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_report_is_not_successful() {
        let report = SyncReport::aborted(2, "sin token".to_string());
        assert!(!report.exitoso);
        assert_eq!(report.total_archivos, 2);
        assert_eq!(report.errores.len(), 1);
    }
}
