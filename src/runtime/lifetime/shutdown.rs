use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::LinkStore;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Resolves once Ctrl+C arrives and the store has answered a final ping.
pub async fn listen_for_shutdown(store: Arc<dyn LinkStore>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    // KV 写入是同步完成的，这里只确认存储仍可达
    let probe = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        store.get("__shutdown_probe__"),
    )
    .await;

    match probe {
        Ok(Ok(_)) => {
            info!("Link store ({}) reachable at shutdown", store.backend_name());
        }
        Ok(Err(e)) => {
            warn!("Link store unreachable at shutdown: {}", e);
        }
        Err(_) => {
            error!(
                "Link store probe timed out after {} seconds",
                SHUTDOWN_TIMEOUT_SECS
            );
        }
    }
}
