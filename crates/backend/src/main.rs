pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod usecases;

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::usecases::u501_sync_sources::graph_client::GraphStore;
use crate::usecases::u501_sync_sources::{sync_all, RemoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;
    let store: Arc<dyn RemoteStore> = Arc::new(GraphStore::new(config.graph.clone()));
    let state: shared::state::SharedState = Arc::new(shared::state::AppState {
        config,
        readiness: shared::readiness::ReadinessState::new(),
        store,
    });

    // Initial download runs in the background; the data endpoints answer
    // 503 until it completes or a manual /sync succeeds.
    {
        let state = state.clone();
        tokio::spawn(async move {
            tracing::info!("Iniciando descarga inicial de archivos...");
            let report = sync_all(
                state.store.clone(),
                &state.config.files.sources,
                state.config.files.download_dir(),
            )
            .await;
            if report.exitoso {
                state.readiness.mark_ready();
                tracing::info!(
                    "Descarga inicial completa: {} archivos",
                    report.archivos_descargados
                );
            } else {
                tracing::error!("Descarga inicial con errores: {:?}", report.errores);
            }
        });
    }

    let app = routes::configure_routes(state.clone())
        .layer(axum::middleware::from_fn(request_logger));

    let addr: std::net::SocketAddr = state.config.server.bind.parse()?;
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: {} is already in use. Please ensure no other process is using this address.",
                    addr
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}

async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} -> {} ({}ms)",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
