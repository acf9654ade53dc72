use std::path::Path;

use anyhow::Result;
use tracing::debug;

/// Development default when neither the environment nor the backend's port
/// file says otherwise.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8065";
/// Written by the backend's port-discovery step on startup.
const PORT_FILE: &str = "backend_port.txt";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: resolve_backend_url(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Resolution order: `BACKEND_URL` env var, then the backend's port file,
/// then the development default.
fn resolve_backend_url() -> String {
    if let Ok(url) = std::env::var("BACKEND_URL") {
        if !url.trim().is_empty() {
            return normalize_base_url(&url);
        }
    }
    if let Some(port) = read_port_file(Path::new(PORT_FILE)) {
        debug!("从 {PORT_FILE} 读取到后端端口 {port}");
        return format!("http://localhost:{port}");
    }
    DEFAULT_BACKEND_URL.to_string()
}

/// A trailing slash would double up against `/api/score`.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_port_file(path: &Path) -> Option<u16> {
    let contents = std::fs::read_to_string(path).ok()?;
    contents.trim().parse().ok()
}
