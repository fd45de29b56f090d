use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::UserStore;

use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(1323);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Snapshot file location from configs or the STORAGE_PATH env var
fn load_storage_path() -> String {
    match configs::load_default() {
        Ok(cfg) => cfg.storage.path,
        Err(_) => env::var("STORAGE_PATH").unwrap_or_else(|_| "data/users.json".to_string()),
    }
}

/// Public entry: load the store and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let storage_path = load_storage_path();
    if let Some(parent) = Path::new(&storage_path).parent() {
        common::env::ensure_dir(parent).await?;
    }

    // Startup fails when the snapshot is missing or malformed; there is
    // no empty-store fallback. Seed the file explicitly on first deploy,
    // e.g. with `{"users": [], "lastuid": 0}`.
    let store = UserStore::load(storage_path.as_str()).await?;
    info!(%storage_path, "user snapshot loaded");

    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors);

    let addr = load_bind_addr()?;
    info!(%addr, "starting user api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
