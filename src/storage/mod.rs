//! KV 存储层
//!
//! 引擎只依赖 get / put / delete / list 四个操作，不要求多键事务，
//! 也不要求读写强一致。值是序列化后的 [`LinkRecord`] JSON 字符串。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::StoreConfig;
use crate::errors::{Result, WaypointError};

pub mod backends;
pub mod models;

pub use backends::{MemoryLinkStore, RedisLinkStore};
pub use models::{KeyPage, LinkMeta, LinkRecord, LinkStatus};

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Raw stored value for `code`.
    async fn get(&self, code: &str) -> Result<Option<String>>;
    async fn put(&self, code: &str, value: String) -> Result<()>;
    async fn delete(&self, code: &str) -> Result<()>;
    /// Walk the key space, at most `limit` codes per page. `cursor` is the token
    /// returned by the previous page.
    async fn list(&self, limit: usize, cursor: Option<&str>) -> Result<KeyPage>;
    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &StoreConfig) -> Result<Arc<dyn LinkStore>> {
        let store: Arc<dyn LinkStore> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryLinkStore::new()),
            "redis" => {
                let store = RedisLinkStore::new(&config.redis)?;
                store.ping().await?;
                Arc::new(store)
            }
            other => {
                error!("Unknown store backend: {}", other);
                return Err(WaypointError::config(format!(
                    "Unknown store backend: {}. Supported: memory, redis",
                    other
                )));
            }
        };

        info!("Link store initialized: {}", store.backend_name());
        Ok(store)
    }
}
