use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use contracts::sync::SourceFile;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::executor::RemoteStore;
use crate::shared::config::GraphConfig;

const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Microsoft Graph document store. Authentication is the client-credentials
/// flow; the token and the resolved drive id are cached across fetches so a
/// sync pass authenticates once.
pub struct GraphStore {
    client: reqwest::Client,
    config: GraphConfig,
    token: Mutex<Option<CachedToken>>,
    drive_id: Mutex<Option<String>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SiteResponse {
    id: String,
}

#[derive(Deserialize)]
struct DrivesResponse {
    value: Vec<DriveInfo>,
}

#[derive(Deserialize)]
struct DriveInfo {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct ItemResponse {
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    download_url: Option<String>,
}

impl GraphStore {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            config,
            token: Mutex::new(None),
            drive_id: Mutex::new(None),
        }
    }

    async fn token(&self) -> anyhow::Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let url = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            self.config.tenant_id
        );
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", "https://graph.microsoft.com/.default"),
            ("grant_type", "client_credentials"),
        ];
        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token request failed: {status}: {body}");
            anyhow::bail!("Error de autenticación contra el proveedor de identidad: {status}");
        }
        let token: TokenResponse = response.json().await?;

        // Renew a minute early so in-flight requests never race expiry.
        let expires_at =
            Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60).max(60));
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }

    async fn drive_id(&self, token: &str) -> anyhow::Result<String> {
        let mut cached = self.drive_id.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let site_url = format!(
            "{GRAPH_BASE}/sites/{}:{}",
            self.config.site_host, self.config.site_path
        );
        let response = self.client.get(&site_url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Error al obtener sitio: {status}");
        }
        let site: SiteResponse = response.json().await?;

        let drives_url = format!("{GRAPH_BASE}/sites/{}/drives", site.id);
        let response = self
            .client
            .get(&drives_url)
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Error al listar bibliotecas: {status}");
        }
        let drives: DrivesResponse = response.json().await?;

        let drive = drives
            .value
            .iter()
            .find(|d| d.name.contains(&self.config.drive_hint))
            .or_else(|| drives.value.first())
            .ok_or_else(|| anyhow::anyhow!("El sitio no tiene bibliotecas de documentos"))?;

        *cached = Some(drive.id.clone());
        Ok(drive.id.clone())
    }
}

#[async_trait]
impl RemoteStore for GraphStore {
    async fn fetch(&self, file: &SourceFile, dest_dir: &Path) -> anyhow::Result<PathBuf> {
        let token = self.token().await?;
        let drive_id = self.drive_id(&token).await?;

        let item_url = format!("{GRAPH_BASE}/drives/{drive_id}/items/{}", file.unique_id);
        let response = self.client.get(&item_url).bearer_auth(&token).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Error al obtener info del archivo {}: {status}", file.nombre);
        }
        let item: ItemResponse = response.json().await?;
        let download_url = item.download_url.ok_or_else(|| {
            anyhow::anyhow!("No se pudo obtener URL de descarga para {}", file.nombre)
        })?;

        // The pre-authenticated download URL needs no bearer token.
        let content = self.client.get(&download_url).send().await?;
        let status = content.status();
        if !status.is_success() {
            anyhow::bail!("Error al descargar {}: {status}", file.nombre);
        }
        let bytes = content.bytes().await?;

        let path = dest_dir.join(&file.nombre);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!("Descargado {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
