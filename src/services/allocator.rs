//! Short code allocation
//!
//! The existence check and the later write are not atomic. Two concurrent
//! requests that land on the same code end up last-write-wins.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{Result, WaypointError};
use crate::storage::LinkStore;
use crate::utils::{CodeGenerator, MAX_CODE_LEN, MIN_CODE_LEN, is_valid_short_code};

/// Single-segment routes registered ahead of `/{code}`. A link stored under
/// one of these names could never be resolved.
pub const RESERVED_CODES: &[&str] = &["admin", "health"];

pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code))
}

pub struct CodeAllocator {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    code_length: usize,
    max_attempts: usize,
}

impl CodeAllocator {
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn CodeGenerator>,
        code_length: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            store,
            generator,
            code_length,
            max_attempts,
        }
    }

    async fn is_taken(&self, code: &str) -> Result<bool> {
        Ok(self.store.get(code).await?.is_some())
    }

    /// Validate a caller-supplied code or draw a fresh random one.
    ///
    /// Any stored value counts as occupied, even one that no longer parses.
    pub async fn allocate(&self, custom: Option<&str>) -> Result<String> {
        match custom {
            Some(code) => self.claim_custom(code).await,
            None => self.generate_unique().await,
        }
    }

    async fn claim_custom(&self, code: &str) -> Result<String> {
        if !is_valid_short_code(code) {
            return Err(WaypointError::invalid_code(format!(
                "Code must be {}-{} characters of [A-Za-z0-9_-]",
                MIN_CODE_LEN, MAX_CODE_LEN
            )));
        }
        if is_reserved_code(code) {
            return Err(WaypointError::conflict(format!(
                "Code '{}' is reserved",
                code
            )));
        }
        if self.is_taken(code).await? {
            return Err(WaypointError::conflict(format!(
                "Code '{}' is already in use",
                code
            )));
        }
        Ok(code.to_string())
    }

    async fn generate_unique(&self) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate(self.code_length);
            if !is_reserved_code(&candidate) && !self.is_taken(&candidate).await? {
                return Ok(candidate);
            }
            debug!(
                "Generated code '{}' collided (attempt {}/{})",
                candidate, attempt, self.max_attempts
            );
        }

        warn!(
            "Could not allocate a free code after {} attempts",
            self.max_attempts
        );
        Err(WaypointError::allocation_exhausted(format!(
            "No free code found after {} attempts",
            self.max_attempts
        )))
    }
}
