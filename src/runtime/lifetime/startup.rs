use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::get_config;
use crate::services::LinkService;
use crate::storage::{LinkStore, StoreFactory};

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
}

/// 准备服务器启动的上下文
/// 包括存储后端和短链服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let store = StoreFactory::create(&config.store)
        .await
        .context("Failed to create link store")?;
    info!("Using link store backend: {}", store.backend_name());

    let link_service = Arc::new(LinkService::with_store(
        store.clone(),
        config.links.clone(),
    ));

    debug!(
        code_length = config.links.code_length,
        allocation_attempts = config.links.allocation_attempts,
        "Link policy loaded"
    );
    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        link_service,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_with_default_memory_store() {
        let ctx = prepare_server_startup().await.unwrap();
        assert_eq!(ctx.store.backend_name(), "memory");
        assert_eq!(ctx.link_service.policy().code_length, 6);
    }
}
