use std::env;
use std::path::PathBuf;

/// Relative locations probed for the remote snapshot document, in order.
/// The first candidate that answers with a well-formed document wins.
pub const SNAPSHOT_PATHS: &[&str] = &["data/app-data.json", "app-data.json"];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub snapshot_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_path: env::var("OUTLAY_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| PathBuf::from("data/outlay.db")),
            snapshot_base: env::var("OUTLAY_SNAPSHOT_BASE")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".into()),
        }
    }

    /// Full candidate URLs for the snapshot fetch chain.
    pub fn snapshot_urls(&self) -> Vec<String> {
        let base = self.snapshot_base.trim_end_matches('/');
        SNAPSHOT_PATHS
            .iter()
            .map(|path| format!("{}/{}", base, path))
            .collect()
    }
}
