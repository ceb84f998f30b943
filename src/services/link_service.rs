//! Link management service
//!
//! Ties the engine pieces to the store. Shared by the HTTP handlers and the
//! CLI so both surfaces behave identically.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::LinkPolicy;
use crate::errors::{Result, WaypointError};
use crate::services::allocator::CodeAllocator;
use crate::services::lifecycle::compute_meta;
use crate::services::listing::{ListPage, ListedItem, PageRequest, clamp_limit, expand_codes};
use crate::services::mutation::{LinkPatch, apply_patch, ttl_from_hours, ttl_from_seconds};
use crate::services::request::{CreateLinkRequest, InitialTtl};
use crate::services::resolver::{RedirectOutcome, resolve};
use crate::storage::{LinkMeta, LinkRecord, LinkStatus, LinkStore};
use crate::utils::url_validator::{normalize_url, validation_error_message};
use crate::utils::{Clock, CodeGenerator, RandomCodeGenerator, SystemClock};

// ============ Response DTOs ============

/// Full view of a stored link with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub code: String,
    pub url: String,
    pub created: i64,
    pub ttl: Option<u64>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<i64>,
    pub status: LinkStatus,
    pub remaining: Option<i64>,
    pub interstitial_enabled: bool,
    pub interstitial_seconds: Option<u64>,
}

impl LinkView {
    pub fn new(code: String, record: &LinkRecord, meta: LinkMeta) -> Self {
        Self {
            code,
            url: record.url.clone(),
            created: record.created,
            ttl: record.ttl,
            expires_at: meta.expires_at,
            status: meta.status,
            remaining: meta.remaining,
            interstitial_enabled: record.interstitial_enabled,
            interstitial_seconds: record.interstitial_seconds,
        }
    }
}

/// Result of link creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLink {
    /// Public short URL, `<origin>/<code>`.
    pub short: String,
    #[serde(flatten)]
    pub link: LinkView,
}

/// Result of a partial update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub ok: bool,
    pub code: String,
    pub status: LinkStatus,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<i64>,
    pub remaining: Option<i64>,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    clock: Arc<dyn Clock>,
    allocator: CodeAllocator,
    policy: LinkPolicy,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        clock: Arc<dyn Clock>,
        generator: Arc<dyn CodeGenerator>,
        policy: LinkPolicy,
    ) -> Self {
        let allocator = CodeAllocator::new(
            store.clone(),
            generator,
            policy.code_length,
            policy.allocation_attempts,
        );
        Self {
            store,
            clock,
            allocator,
            policy,
        }
    }

    /// Wall clock and random codes.
    pub fn with_store(store: Arc<dyn LinkStore>, policy: LinkPolicy) -> Self {
        Self::new(
            store,
            Arc::new(SystemClock),
            Arc::new(RandomCodeGenerator),
            policy,
        )
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// Load and decode a record. Corrupt values read as absent.
    async fn load(&self, code: &str) -> Result<Option<LinkRecord>> {
        let raw = self.store.get(code).await.map_err(|e| {
            error!("LinkService: failed to read '{}': {}", code, e);
            e
        })?;

        Ok(match raw {
            None => None,
            Some(raw) => {
                let record = LinkRecord::decode(&raw);
                if record.is_none() {
                    debug!("LinkService: stored value for '{}' is unreadable", code);
                }
                record
            }
        })
    }

    async fn save(&self, code: &str, record: &LinkRecord) -> Result<()> {
        self.store.put(code, record.encode()?).await.map_err(|e| {
            error!("LinkService: failed to write '{}': {}", code, e);
            e
        })
    }

    /// Create a link. `base_url` is the public origin the short URL is built on.
    pub async fn create_link(&self, req: CreateLinkRequest, base_url: &str) -> Result<CreatedLink> {
        let url = normalize_url(&req.url).map_err(|e| {
            debug!("LinkService: rejected url '{}': {}", req.url, e);
            WaypointError::invalid_url(validation_error_message(&e))
        })?;

        let code = self.allocator.allocate(req.code.as_deref()).await?;

        let ttl = match req.ttl {
            Some(InitialTtl::Hours(hours)) => Some(ttl_from_hours(hours)?),
            Some(InitialTtl::Seconds(secs)) => Some(ttl_from_seconds(secs)?),
            None => None,
        };

        let (interstitial_enabled, interstitial_seconds) = req
            .interstitial
            .resolve(false, self.policy.default_interstitial_seconds)?;

        let now = self.clock.now();
        let record = LinkRecord {
            url,
            created: now,
            ttl,
            valid: Some(true),
            interstitial_enabled,
            interstitial_seconds: Some(interstitial_seconds),
        };
        self.save(&code, &record).await?;

        info!("LinkService: created '{}' -> {}", code, record.url);

        let meta = compute_meta(Some(&record), now);
        Ok(CreatedLink {
            short: format!("{}/{}", base_url.trim_end_matches('/'), code),
            link: LinkView::new(code, &record, meta),
        })
    }

    /// Fetch one link with its derived status. Expired and invalid links are
    /// still returned; only absent or unreadable ones are `NotFound`.
    pub async fn get_link(&self, code: &str) -> Result<LinkView> {
        let record = self
            .load(code)
            .await?
            .ok_or_else(|| WaypointError::not_found(format!("Link '{}' not found", code)))?;
        let meta = compute_meta(Some(&record), self.clock.now());
        Ok(LinkView::new(code.to_string(), &record, meta))
    }

    /// One page of codes, optionally expanded into full views.
    pub async fn list_links(&self, req: PageRequest) -> Result<ListPage> {
        let limit = clamp_limit(req.limit, req.expand, &self.policy);
        let cursor = req.cursor.as_deref().filter(|c| !c.is_empty());

        let page = self.store.list(limit, cursor).await.map_err(|e| {
            error!("LinkService: failed to list links: {}", e);
            e
        })?;

        // 后端只应返回至多 limit 个键；多出的部分在此丢弃（不会出现在后续页中），
        // 保证展开时的读放大不超过上限
        let mut codes = page.codes;
        if codes.len() > limit {
            warn!(
                "LinkService: store returned {} codes for limit {}, dropping the surplus",
                codes.len(),
                limit
            );
            codes.truncate(limit);
        }

        let items = if req.expand {
            expand_codes(self.store.as_ref(), codes, self.clock.now()).await
        } else {
            codes
                .into_iter()
                .map(|code| ListedItem::Code { code })
                .collect()
        };

        debug!(
            "LinkService: listed {} codes (expand={}, complete={})",
            items.len(),
            req.expand,
            page.complete
        );

        Ok(ListPage {
            items,
            cursor: page.cursor,
            list_complete: page.complete,
        })
    }

    /// Apply a partial update and persist it.
    pub async fn patch_link(&self, code: &str, patch: &LinkPatch) -> Result<PatchOutcome> {
        let record = self
            .load(code)
            .await?
            .ok_or_else(|| WaypointError::not_found(format!("Link '{}' not found", code)))?;

        let now = self.clock.now();
        let updated = apply_patch(
            record,
            patch,
            now,
            self.policy.default_interstitial_seconds,
        )?;
        self.save(code, &updated).await?;

        let meta = compute_meta(Some(&updated), now);
        info!("LinkService: updated '{}' (status: {})", code, meta.status);

        Ok(PatchOutcome {
            ok: true,
            code: code.to_string(),
            status: meta.status,
            expires_at: meta.expires_at,
            remaining: meta.remaining,
        })
    }

    /// Decide what the public redirect endpoint does for `code`.
    pub async fn resolve_redirect(&self, code: &str) -> Result<RedirectOutcome> {
        let record = self.load(code).await?;
        let meta = compute_meta(record.as_ref(), self.clock.now());
        let outcome = resolve(record.as_ref(), &meta);
        if matches!(outcome, RedirectOutcome::NotFound) {
            debug!("Redirect not found: {}", code);
        }
        Ok(outcome)
    }

    /// Target URL of a live link, ignoring the interstitial setting.
    ///
    /// Expired and invalidated links are `Gone`; absent or unreadable ones are `NotFound`.
    pub async fn follow_link(&self, code: &str) -> Result<String> {
        match self.resolve_redirect(code).await? {
            RedirectOutcome::Redirect { url } | RedirectOutcome::Interstitial { url, .. } => Ok(url),
            RedirectOutcome::Gone => Err(WaypointError::gone(format!(
                "Link '{}' has expired or been invalidated",
                code
            ))),
            RedirectOutcome::NotFound => {
                Err(WaypointError::not_found(format!("Link '{}' not found", code)))
            }
        }
    }

    /// Cheap store probe for health checks.
    pub async fn ping_store(&self) -> Result<()> {
        self.store.list(1, None).await.map(|_| ())
    }
}
