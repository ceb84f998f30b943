use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::Result;
use crate::storage::{KeyPage, LinkStore};

/// In-process store. Keys are kept ordered so the cursor can simply be the
/// last key of the previous page.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(code).cloned())
    }

    async fn put(&self, code: &str, value: String) -> Result<()> {
        self.entries.write().insert(code.to_string(), value);
        Ok(())
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.entries.write().remove(code);
        Ok(())
    }

    async fn list(&self, limit: usize, cursor: Option<&str>) -> Result<KeyPage> {
        let entries = self.entries.read();
        let start = match cursor {
            Some(after) if !after.is_empty() => Bound::Excluded(after),
            _ => Bound::Unbounded,
        };

        // 多取一个判断是否还有下一页
        let mut codes: Vec<String> = entries
            .range::<str, _>((start, Bound::Unbounded))
            .take(limit.saturating_add(1))
            .map(|(code, _)| code.clone())
            .collect();

        let complete = codes.len() <= limit;
        if !complete {
            codes.truncate(limit);
        }
        let cursor = if complete { None } else { codes.last().cloned() };

        Ok(KeyPage {
            codes,
            cursor,
            complete,
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
