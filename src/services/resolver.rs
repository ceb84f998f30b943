//! Redirect decision

use actix_web::http::StatusCode;

use crate::storage::{LinkMeta, LinkRecord, LinkStatus};

/// What the public redirect endpoint does with a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// No record, or one that cannot be parsed.
    NotFound,
    /// Expired or soft-deleted.
    Gone,
    Interstitial { url: String, seconds: u64 },
    Redirect { url: String },
}

impl RedirectOutcome {
    pub fn http_status(&self) -> StatusCode {
        match self {
            RedirectOutcome::NotFound => StatusCode::NOT_FOUND,
            RedirectOutcome::Gone => StatusCode::GONE,
            RedirectOutcome::Interstitial { .. } => StatusCode::OK,
            RedirectOutcome::Redirect { .. } => StatusCode::FOUND,
        }
    }
}

/// Map a record and its derived status to a redirect outcome.
pub fn resolve(record: Option<&LinkRecord>, meta: &LinkMeta) -> RedirectOutcome {
    let record = match record {
        Some(record) if meta.status.is_live() => record,
        Some(_) if meta.status != LinkStatus::Missing => return RedirectOutcome::Gone,
        _ => return RedirectOutcome::NotFound,
    };

    match record.effective_interstitial_seconds() {
        Some(seconds) => RedirectOutcome::Interstitial {
            url: record.url.clone(),
            seconds,
        },
        None => RedirectOutcome::Redirect {
            url: record.url.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lifecycle::compute_meta;

    fn outcome(record: &LinkRecord, now: i64) -> RedirectOutcome {
        resolve(Some(record), &compute_meta(Some(record), now))
    }

    #[test]
    fn test_missing_is_404() {
        let result = resolve(None, &LinkMeta::MISSING);
        assert_eq!(result, RedirectOutcome::NotFound);
        assert_eq!(result.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_expired_and_invalid_are_410() {
        let expired = LinkRecord {
            ttl: Some(10),
            ..LinkRecord::new("https://a.io/", 0)
        };
        assert_eq!(outcome(&expired, 10), RedirectOutcome::Gone);

        let invalid = LinkRecord {
            valid: Some(false),
            ..LinkRecord::new("https://a.io/", 0)
        };
        assert_eq!(outcome(&invalid, 0), RedirectOutcome::Gone);
        assert_eq!(outcome(&invalid, 0).http_status(), StatusCode::GONE);
    }

    #[test]
    fn test_status_liveness() {
        assert!(LinkStatus::Active.is_live());
        assert!(LinkStatus::Expiring.is_live());
        for status in [LinkStatus::Expired, LinkStatus::Invalid, LinkStatus::Missing] {
            assert!(!status.is_live());
        }
    }

    #[test]
    fn test_live_redirects_with_302() {
        let record = LinkRecord {
            ttl: Some(100),
            ..LinkRecord::new("https://a.io/", 0)
        };
        // expiring 仍然跳转
        let result = outcome(&record, 50);
        assert_eq!(
            result,
            RedirectOutcome::Redirect {
                url: "https://a.io/".into()
            }
        );
        assert_eq!(result.http_status(), StatusCode::FOUND);
    }

    #[test]
    fn test_interstitial_only_with_positive_seconds() {
        let mut record = LinkRecord::new("https://a.io/", 0);
        record.interstitial_enabled = true;
        record.interstitial_seconds = Some(5);
        assert_eq!(
            outcome(&record, 0),
            RedirectOutcome::Interstitial {
                url: "https://a.io/".into(),
                seconds: 5
            }
        );

        record.interstitial_seconds = Some(0);
        assert!(matches!(outcome(&record, 0), RedirectOutcome::Redirect { .. }));

        record.interstitial_seconds = Some(5);
        record.interstitial_enabled = false;
        assert!(matches!(outcome(&record, 0), RedirectOutcome::Redirect { .. }));
    }
}
