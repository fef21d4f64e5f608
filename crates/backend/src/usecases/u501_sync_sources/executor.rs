use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use contracts::sync::{SourceFile, SyncReport};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Download fan-out width. The sources are a handful of workbooks, more
/// concurrency only hammers the Graph throttling limits.
pub const MAX_CONCURRENT_FETCHES: usize = 4;

/// The document-store collaborator: given a named remote file, produce a
/// local readable copy under `dest_dir`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch(&self, file: &SourceFile, dest_dir: &Path) -> anyhow::Result<PathBuf>;
}

/// Mirrors every configured file, collecting per-file failures instead of
/// aborting sibling fetches. The report is successful only when all files
/// landed.
pub async fn sync_all(
    store: Arc<dyn RemoteStore>,
    files: &[SourceFile],
    dest_dir: &Path,
) -> SyncReport {
    let total_archivos = files.len();
    if let Err(e) = tokio::fs::create_dir_all(dest_dir).await {
        return SyncReport::aborted(
            total_archivos,
            format!("No se pudo crear el directorio de descargas: {e}"),
        );
    }

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
    let mut tasks: JoinSet<(String, anyhow::Result<PathBuf>)> = JoinSet::new();

    for file in files.iter().cloned() {
        let store = store.clone();
        let semaphore = semaphore.clone();
        let dest_dir = dest_dir.to_path_buf();
        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return (file.nombre.clone(), Err(e.into())),
            };
            let result = store.fetch(&file, &dest_dir).await;
            (file.nombre, result)
        });
    }

    let mut archivos_descargados = 0;
    let mut errores = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((nombre, Ok(path))) => {
                tracing::info!("Archivo sincronizado: {} -> {}", nombre, path.display());
                archivos_descargados += 1;
            }
            Ok((nombre, Err(e))) => {
                tracing::error!("Error descargando {}: {e:#}", nombre);
                errores.push(format!("Error descargando {nombre}: {e:#}"));
            }
            Err(e) => {
                tracing::error!("Tarea de descarga abortada: {e}");
                errores.push(format!("Tarea de descarga abortada: {e}"));
            }
        }
    }

    SyncReport {
        exitoso: errores.is_empty(),
        archivos_descargados,
        total_archivos,
        errores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub store: writes an empty file, or fails for configured names.
    struct StubStore {
        failing: Vec<String>,
    }

    #[async_trait]
    impl RemoteStore for StubStore {
        async fn fetch(&self, file: &SourceFile, dest_dir: &Path) -> anyhow::Result<PathBuf> {
            if self.failing.contains(&file.nombre) {
                anyhow::bail!("HTTP 403");
            }
            let path = dest_dir.join(&file.nombre);
            tokio::fs::write(&path, b"contenido").await?;
            Ok(path)
        }
    }

    fn sources() -> Vec<SourceFile> {
        vec![
            SourceFile {
                unique_id: "id-1".to_string(),
                nombre: "compras.xlsx".to_string(),
            },
            SourceFile {
                unique_id: "id-2".to_string(),
                nombre: "traduccion.xlsx".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn all_files_landing_makes_the_sync_successful() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StubStore { failing: vec![] });
        let report = sync_all(store, &sources(), dir.path()).await;
        assert!(report.exitoso);
        assert_eq!(report.archivos_descargados, 2);
        assert_eq!(report.total_archivos, 2);
        assert!(report.errores.is_empty());
        assert!(dir.path().join("compras.xlsx").exists());
    }

    #[tokio::test]
    async fn one_failure_is_collected_without_aborting_the_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StubStore {
            failing: vec!["traduccion.xlsx".to_string()],
        });
        let report = sync_all(store, &sources(), dir.path()).await;
        assert!(!report.exitoso);
        assert_eq!(report.archivos_descargados, 1);
        assert_eq!(report.total_archivos, 2);
        assert_eq!(report.errores.len(), 1);
        assert!(report.errores[0].contains("traduccion.xlsx"));
        // The file that did land stays usable.
        assert!(dir.path().join("compras.xlsx").exists());
    }

    #[tokio::test]
    async fn empty_source_list_is_a_successful_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StubStore { failing: vec![] });
        let report = sync_all(store, &[], dir.path()).await;
        assert!(report.exitoso);
        assert_eq!(report.archivos_descargados, 0);
        assert_eq!(report.total_archivos, 0);
    }
}
