use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::config::RedisConfig;
use crate::errors::{Result, WaypointError};
use crate::storage::{KeyPage, LinkStore};

/// Redis-backed store. Every code lives under `key_prefix`; listing walks the
/// key space with `SCAN` and never returns more than `limit` codes per page.
pub struct RedisLinkStore {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key_prefix: String,
}

impl RedisLinkStore {
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            WaypointError::config(format!("Invalid Redis URL '{}': {}", config.url, e))
        })?;

        debug!(
            "RedisLinkStore created with prefix: '{}'",
            config.key_prefix
        );

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// 启动时检查 Redis 是否可达
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to ping Redis server: {}", e);
                WaypointError::store_operation(format!("Redis ping failed: {}", e))
            })?;
        debug!("Redis connection test successful: {}", response);
        Ok(())
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    /// Log, drop the cached connection and convert.
    async fn fail(&self, op: &str, err: redis::RedisError) -> WaypointError {
        error!("Redis {} failed: {}", op, err);
        self.reset_connection().await;
        err.into()
    }

    fn make_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }

    fn strip_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.key_prefix.as_str())
    }
}

/// Listing cursor: a Redis `SCAN` position, plus how many keys of the batch at
/// that position were already handed out. Rendered as `position` or `position:skip`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScanCursor {
    position: String,
    skip: usize,
}

impl ScanCursor {
    fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("0");
        match raw.split_once(':') {
            Some((position, skip)) => Self {
                position: position.to_string(),
                skip: skip.parse().unwrap_or(0),
            },
            None => Self {
                position: raw.to_string(),
                skip: 0,
            },
        }
    }
}

impl std::fmt::Display for ScanCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.skip == 0 {
            write!(f, "{}", self.position)
        } else {
            write!(f, "{}:{}", self.position, self.skip)
        }
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        match conn.get::<_, Option<String>>(self.make_key(code)).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.fail("GET", e).await),
        }
    }

    async fn put(&self, code: &str, value: String) -> Result<()> {
        let mut conn = self.get_connection().await?;
        match conn.set::<_, _, ()>(self.make_key(code), value).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail("SET", e).await),
        }
    }

    async fn delete(&self, code: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        match conn.del::<_, ()>(self.make_key(code)).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail("DEL", e).await),
        }
    }

    async fn list(&self, limit: usize, cursor: Option<&str>) -> Result<KeyPage> {
        let limit = limit.max(1);
        let mut conn = self.get_connection().await?;
        let pattern = format!("{}*", self.key_prefix);
        let ScanCursor {
            mut position,
            mut skip,
        } = ScanCursor::parse(cursor);
        let mut codes = Vec::with_capacity(limit);

        // COUNT 只是提示：一批可能为空，也可能多于 limit，所以循环直到凑满或扫完
        loop {
            let scanned: redis::RedisResult<(String, Vec<String>)> = redis::cmd("SCAN")
                .arg(&position)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(limit)
                .query_async(&mut conn)
                .await;
            let (next, keys) = match scanned {
                Ok(result) => result,
                Err(e) => return Err(self.fail("SCAN", e).await),
            };

            let batch: Vec<String> = keys
                .iter()
                .filter_map(|key| self.strip_key(key))
                .map(str::to_string)
                .skip(skip)
                .collect();
            let room = limit - codes.len();

            if batch.len() > room {
                // 本批剩余部分留给下一页：从同一个位置重扫并跳过已返回的键
                codes.extend(batch.into_iter().take(room));
                let resume = ScanCursor {
                    position,
                    skip: skip + room,
                };
                return Ok(KeyPage {
                    codes,
                    cursor: Some(resume.to_string()),
                    complete: false,
                });
            }

            codes.extend(batch);
            if next == "0" {
                return Ok(KeyPage {
                    codes,
                    cursor: None,
                    complete: true,
                });
            }
            if codes.len() == limit {
                return Ok(KeyPage {
                    codes,
                    cursor: Some(next),
                    complete: false,
                });
            }
            position = next;
            skip = 0;
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
