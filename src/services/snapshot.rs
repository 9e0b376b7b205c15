use reqwest::Client;
use tracing::{debug, info, warn};

use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::AppData;
use crate::services::version::is_newer;

/// Fetch the published snapshot from the first candidate URL that answers
/// with a well-formed document.
///
/// A network error, non-success status, or malformed body moves on to the
/// next candidate. The cache is bypassed on every request so a freshly
/// published snapshot is seen immediately. Callers issue at most one fetch at
/// a time; there is no cancellation.
pub async fn fetch_snapshot(client: &Client, urls: &[String]) -> AppResult<AppData> {
    for url in urls {
        debug!(url = %url, "Trying snapshot candidate");

        let response = match client
            .get(url)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "Snapshot candidate unreachable");
                continue;
            }
        };

        if !response.status().is_success() {
            debug!(url = %url, status = %response.status(), "Snapshot candidate answered non-success");
            continue;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(url = %url, error = %e, "Failed to read snapshot body");
                continue;
            }
        };

        match AppData::from_json(&body) {
            Ok(data) => {
                info!(url = %url, record_count = data.records.len(), "Fetched snapshot");
                return Ok(data);
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Snapshot candidate is malformed");
            }
        }
    }

    warn!(
        candidate_count = urls.len(),
        "All snapshot candidates failed"
    );
    Err(AppError::Snapshot(
        "No snapshot candidate answered with a usable document".into(),
    ))
}

/// Whether a fetched snapshot should replace local state during startup
/// reconciliation. An installation with no records always adopts; otherwise
/// the remote's declared version must be strictly newer than the last adopted
/// one.
pub fn should_adopt(local: &AppData, stored_version: Option<&str>, remote: &AppData) -> bool {
    if local.records.is_empty() {
        return true;
    }
    is_newer(stored_version, remote.version.as_deref().unwrap_or(""))
}

/// Startup reconciliation. Returns whether the remote snapshot was adopted.
/// A fetch failure is reported back as an error and leaves local state
/// untouched.
pub async fn check_for_update(store: &Store, client: &Client, urls: &[String]) -> AppResult<bool> {
    let remote = fetch_snapshot(client, urls).await?;
    let local = store.load();
    let stored_version = store.adopted_version();

    if should_adopt(&local, stored_version.as_deref(), &remote) {
        info!(
            version = remote.version.as_deref().unwrap_or("unversioned"),
            record_count = remote.records.len(),
            "Adopting remote snapshot"
        );
        store.replace(&remote);
        Ok(true)
    } else {
        debug!("Local state is current, keeping it");
        Ok(false)
    }
}

/// Manual refresh: adopt the fetched snapshot regardless of version
/// comparison. Success or failure is reported to the caller, which surfaces
/// it to the user.
pub async fn force_refresh(store: &Store, client: &Client, urls: &[String]) -> AppResult<AppData> {
    let remote = fetch_snapshot(client, urls).await?;
    info!(
        version = remote.version.as_deref().unwrap_or("unversioned"),
        record_count = remote.records.len(),
        "Refreshed from remote snapshot"
    );
    store.replace(&remote);
    Ok(remote)
}
