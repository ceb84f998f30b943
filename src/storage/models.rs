use serde::{Deserialize, Serialize};

/// Stored link payload.
///
/// Serialised as JSON into the KV store, one value per code:
/// `{"url":..,"created":..,"ttl":..,"valid":..,"interstitial_enabled":..,"interstitial_seconds":..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    /// 最近一次（重新）开始计时的时间，epoch 秒
    pub created: i64,
    /// 存活秒数，`None` 表示永不过期
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// `Some(false)` 表示软删除
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default)]
    pub interstitial_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interstitial_seconds: Option<u64>,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>, created: i64) -> Self {
        Self {
            url: url.into(),
            created,
            ttl: None,
            valid: None,
            interstitial_enabled: false,
            interstitial_seconds: None,
        }
    }

    /// Parse a stored value. Corrupt payloads and records without a URL yield `None`.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .filter(|record| !record.url.is_empty())
    }

    pub fn encode(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Soft-deleted records are the ones explicitly marked `valid: false`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid != Some(false)
    }

    /// Interstitial countdown that applies to this record, if any.
    #[inline]
    pub fn effective_interstitial_seconds(&self) -> Option<u64> {
        match self.interstitial_seconds {
            Some(secs) if self.interstitial_enabled && secs > 0 => Some(secs),
            _ => None,
        }
    }

    /// Expiry instant in epoch seconds; `None` when permanent.
    #[inline]
    pub fn expires_at(&self) -> Option<i64> {
        match self.ttl {
            Some(ttl) if ttl > 0 => {
                Some(self.created.saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX)))
            }
            _ => None,
        }
    }
}

/// Derived display status of a code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Expiring,
    Expired,
    Invalid,
    Missing,
}

impl LinkStatus {
    /// Statuses under which the redirect endpoint still sends visitors on.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, LinkStatus::Active | LinkStatus::Expiring)
    }
}

/// Status plus remaining-time fields, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkMeta {
    pub status: LinkStatus,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<i64>,
    pub remaining: Option<i64>,
}

impl LinkMeta {
    pub const MISSING: LinkMeta = LinkMeta {
        status: LinkStatus::Missing,
        expires_at: None,
        remaining: None,
    };
}

/// One page of keys from a store listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPage {
    pub codes: Vec<String>,
    /// Opaque token for the next page; `None` once the listing is complete.
    pub cursor: Option<String>,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_original_payload() {
        let raw = r#"{"url":"https://example.com/","created":1700000000,"ttl":3600,"valid":true,"interstitial_enabled":true,"interstitial_seconds":7}"#;
        let record = LinkRecord::decode(raw).unwrap();
        assert_eq!(record.ttl, Some(3600));
        assert_eq!(record.expires_at(), Some(1_700_003_600));
        assert_eq!(record.effective_interstitial_seconds(), Some(7));
    }

    #[test]
    fn test_decode_minimal_payload() {
        let record = LinkRecord::decode(r#"{"url":"https://a.io/","created":1}"#).unwrap();
        assert!(record.is_valid());
        assert!(!record.interstitial_enabled);
        assert_eq!(record.expires_at(), None);
    }

    #[test]
    fn test_decode_rejects_corrupt_values() {
        assert!(LinkRecord::decode("not json").is_none());
        assert!(LinkRecord::decode(r#"{"created":1}"#).is_none());
        assert!(LinkRecord::decode(r#"{"url":"","created":1}"#).is_none());
        assert!(LinkRecord::decode(r#"["https://a.io/"]"#).is_none());
    }

    #[test]
    fn test_encode_skips_absent_fields() {
        let json = LinkRecord::new("https://a.io/", 10).encode().unwrap();
        assert_eq!(
            json,
            r#"{"url":"https://a.io/","created":10,"interstitial_enabled":false}"#
        );
    }

    #[test]
    fn test_zero_seconds_means_no_interstitial() {
        let mut record = LinkRecord::new("https://a.io/", 0);
        record.interstitial_enabled = true;
        record.interstitial_seconds = Some(0);
        assert_eq!(record.effective_interstitial_seconds(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LinkStatus::Expiring.to_string(), "expiring");
        assert_eq!(
            serde_json::to_string(&LinkStatus::Missing).unwrap(),
            "\"missing\""
        );
    }
}
