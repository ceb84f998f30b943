//! Key-space listing with optional expansion

use futures_util::future::join_all;
use serde::Serialize;
use tracing::error;

use crate::config::LinkPolicy;
use crate::services::LinkView;
use crate::services::lifecycle::compute_meta;
use crate::storage::{LinkRecord, LinkStatus, LinkStore};

/// Query for one page of codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub expand: bool,
}

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListedItem {
    Full(LinkView),
    Missing { code: String, status: LinkStatus },
    Code { code: String },
}

impl ListedItem {
    pub fn code(&self) -> &str {
        match self {
            ListedItem::Full(view) => &view.code,
            ListedItem::Missing { code, .. } | ListedItem::Code { code } => code,
        }
    }

    pub fn status(&self) -> Option<LinkStatus> {
        match self {
            ListedItem::Full(view) => Some(view.status),
            ListedItem::Missing { status, .. } => Some(*status),
            ListedItem::Code { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    pub items: Vec<ListedItem>,
    pub cursor: Option<String>,
    pub list_complete: bool,
}

/// Parse a `limit` query value. Anything non-numeric is ignored.
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n.floor() as i64)
}

/// Clamp a requested page size. Expanded pages have a tighter cap since every
/// row costs one store read.
pub fn clamp_limit(requested: Option<i64>, expand: bool, policy: &LinkPolicy) -> usize {
    let cap = if expand {
        policy.max_expand_page_size.min(policy.max_page_size)
    } else {
        policy.max_page_size
    }
    .max(1);

    match requested {
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX).min(cap),
        None => policy.default_page_size.clamp(1, cap),
    }
}

async fn expand_one(store: &dyn LinkStore, code: String, now: i64) -> ListedItem {
    let raw = match store.get(&code).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to read '{}' while expanding listing: {}", code, e);
            None
        }
    };

    match raw.as_deref().and_then(LinkRecord::decode) {
        Some(record) => {
            let meta = compute_meta(Some(&record), now);
            ListedItem::Full(LinkView::new(code, &record, meta))
        }
        None => ListedItem::Missing {
            code,
            status: LinkStatus::Missing,
        },
    }
}

/// Resolve every code concurrently, keeping the input order.
///
/// A code that vanished or holds a corrupt value becomes a `missing` row.
pub async fn expand_codes(store: &dyn LinkStore, codes: Vec<String>, now: i64) -> Vec<ListedItem> {
    join_all(codes.into_iter().map(|code| expand_one(store, code, now))).await
}
