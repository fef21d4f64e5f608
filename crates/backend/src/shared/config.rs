use contracts::sync::SourceFile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub graph: GraphConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Microsoft Graph access. The secret values are normally injected through
/// the environment (see `apply_env_overrides`), the rest describes the
/// SharePoint site the source files live in.
#[derive(Debug, Deserialize, Clone)]
pub struct GraphConfig {
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    pub site_host: String,
    pub site_path: String,
    /// Preferred document library; falls back to the first drive.
    pub drive_hint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub download_dir: String,
    /// Local names of the two pipeline inputs and the export template,
    /// all resolved inside `download_dir`.
    pub purchases: String,
    pub reference: String,
    pub template: String,
    pub sources: Vec<SourceFile>,
}

impl FilesConfig {
    pub fn download_dir(&self) -> &Path {
        Path::new(&self.download_dir)
    }

    pub fn purchases_path(&self) -> PathBuf {
        self.download_dir().join(&self.purchases)
    }

    pub fn reference_path(&self) -> PathBuf {
        self.download_dir().join(&self.reference)
    }

    pub fn template_path(&self) -> PathBuf {
        self.download_dir().join(&self.template)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:8000"

[graph]
site_host = "corsusaadmin.sharepoint.com"
site_path = "/sites/logistica"
drive_hint = "Documentos"

[files]
download_dir = "./descargas"
purchases = "002_Compras_OCI.xlsx"
reference = "Traduccion-Equipos.xlsx"
template = "Plantilla.xlsx"

[[files.sources]]
unique_id = "C36C72E3-D62D-4165-9042-5F0F16635B56"
nombre = "002_Compras_OCI.xlsx"

[[files.sources]]
unique_id = "BE104FCC-839F-49C1-A73B-CD0285A6858C"
nombre = "Traduccion-Equipos.xlsx"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Graph credentials are then overridden from the environment when present.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    let overrides = [
        ("TENANT_ID", &mut config.graph.tenant_id),
        ("CLIENT_ID", &mut config.graph.client_id),
        ("CLIENT_SECRET", &mut config.graph.client_secret),
    ];
    for (var, slot) in overrides {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                *slot = value;
            }
        }
    }
}
