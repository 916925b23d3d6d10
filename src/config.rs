use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::tmdb::TMDB_BASE;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PREFS_PATH: &str = "movie-store.json";
const DEFAULT_ADDR: &str = "0.0.0.0:3146";

#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_timeout: Duration,
    pub prefs_path: PathBuf,
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let tmdb_api_key = env::var("TMDB_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("TMDB_API_KEY must be set")?;
        let tmdb_base_url = env::var("TMDB_BASE_URL").unwrap_or_else(|_| TMDB_BASE.to_string());
        let tmdb_timeout = match env::var("TMDB_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("TMDB_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let prefs_path = env::var("MOVIEFINDER_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREFS_PATH));
        let addr_raw = env::var("MOVIEFINDER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let listen_addr = addr_raw
            .parse()
            .with_context(|| format!("MOVIEFINDER_ADDR is not a socket address: {}", addr_raw))?;

        info!(
            base_url = %tmdb_base_url,
            prefs = %prefs_path.display(),
            "Configuration loaded"
        );
        Ok(Self {
            tmdb_api_key,
            tmdb_base_url,
            tmdb_timeout,
            prefs_path,
            listen_addr,
        })
    }
}
