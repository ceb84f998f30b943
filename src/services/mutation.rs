//! Partial updates of a stored record
//!
//! Applied in a fixed order: lifecycle action, TTL, interstitial. Each part is
//! optional and leaves the stored value alone when absent. The caller persists
//! the returned record.

use std::str::FromStr;

use crate::errors::{Result, WaypointError};
use crate::storage::LinkRecord;

/// Soft delete / restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleAction {
    Invalidate,
    Restore,
}

impl LifecycleAction {
    pub fn parse(raw: &str) -> Result<Self> {
        LifecycleAction::from_str(raw).map_err(|_| {
            WaypointError::invalid_action(format!(
                "Unknown action '{}', expected 'invalidate' or 'restore'",
                raw
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TtlChange {
    /// Make the link permanent.
    Clear,
    /// New TTL in hours, counted from the moment of the update.
    SetHours(f64),
}

/// Requested interstitial settings. `None` fields were not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterstitialChange {
    pub enabled: Option<bool>,
    pub seconds: Option<i64>,
}

impl InterstitialChange {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.seconds.is_none()
    }

    /// Resolve to the `(enabled, seconds)` pair to store.
    ///
    /// Disabling forces 0 seconds. Enabling keeps a positive value and falls
    /// back to `default_seconds` otherwise, except that a negative value sent
    /// together with an explicit enable is rejected.
    pub fn resolve(&self, current_enabled: bool, default_seconds: u64) -> Result<(bool, u64)> {
        let enabled = self.enabled.unwrap_or(current_enabled);
        if !enabled {
            return Ok((false, 0));
        }

        match self.seconds {
            Some(secs) if secs > 0 => Ok((true, secs as u64)),
            Some(secs) if secs < 0 && self.enabled == Some(true) => {
                Err(WaypointError::invalid_seconds(format!(
                    "interstitial_seconds must not be negative, got {}",
                    secs
                )))
            }
            _ => Ok((true, default_seconds)),
        }
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPatch {
    pub action: Option<LifecycleAction>,
    pub ttl: Option<TtlChange>,
    pub interstitial: InterstitialChange,
}

/// `hours * 3600`, rounded. Non-positive and non-finite values are rejected.
pub fn ttl_from_hours(hours: f64) -> Result<u64> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(WaypointError::invalid_ttl(format!(
            "ttl_hours must be a positive number, got {}",
            hours
        )));
    }
    Ok(seconds_from_f64(hours * 3600.0))
}

/// TTL given directly in seconds, rounded.
pub fn ttl_from_seconds(secs: f64) -> Result<u64> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(WaypointError::invalid_ttl(format!(
            "ttl must be a positive number of seconds, got {}",
            secs
        )));
    }
    Ok(seconds_from_f64(secs))
}

#[inline]
fn seconds_from_f64(secs: f64) -> u64 {
    // `as` saturates at u64::MAX
    secs.round() as u64
}

/// Apply `patch` to `record` as of `now`.
///
/// Nothing is returned on error, so a rejected patch never half-applies.
pub fn apply_patch(
    mut record: LinkRecord,
    patch: &LinkPatch,
    now: i64,
    default_interstitial_seconds: u64,
) -> Result<LinkRecord> {
    match patch.action {
        Some(LifecycleAction::Invalidate) => record.valid = Some(false),
        Some(LifecycleAction::Restore) => record.valid = Some(true),
        None => {}
    }

    match patch.ttl {
        Some(TtlChange::Clear) => record.ttl = None,
        Some(TtlChange::SetHours(hours)) => {
            record.ttl = Some(ttl_from_hours(hours)?);
            // 修改 TTL 总是从现在重新计时
            record.created = now;
        }
        None => {}
    }

    if !patch.interstitial.is_empty() {
        let (enabled, seconds) = patch
            .interstitial
            .resolve(record.interstitial_enabled, default_interstitial_seconds)?;
        record.interstitial_enabled = enabled;
        record.interstitial_seconds = Some(seconds);
    }

    Ok(record)
}
