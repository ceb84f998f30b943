//! Link status derivation
//!
//! Status is never stored: it is recomputed from `created`, `ttl`, `valid`
//! and the current time on every read, list expansion and redirect.

use crate::storage::{LinkMeta, LinkRecord, LinkStatus};

/// Remaining time at or below which a live link is reported as `expiring`.
pub const SOON_THRESHOLD_SECS: i64 = 3600;

/// Derive status, `expiresAt` and `remaining` for a (possibly absent) record.
pub fn compute_meta(record: Option<&LinkRecord>, now: i64) -> LinkMeta {
    let Some(record) = record else {
        return LinkMeta::MISSING;
    };

    if !record.is_valid() {
        return LinkMeta {
            status: LinkStatus::Invalid,
            expires_at: None,
            remaining: None,
        };
    }

    // ttl 缺省或为 0：永久有效
    let Some(exp) = record.expires_at() else {
        return LinkMeta {
            status: LinkStatus::Active,
            expires_at: None,
            remaining: None,
        };
    };

    let remain = exp.saturating_sub(now);
    let (status, remaining) = if remain <= 0 {
        (LinkStatus::Expired, 0)
    } else if remain <= SOON_THRESHOLD_SECS {
        (LinkStatus::Expiring, remain)
    } else {
        (LinkStatus::Active, remain)
    };

    LinkMeta {
        status,
        expires_at: Some(exp),
        remaining: Some(remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created: i64, ttl: Option<u64>) -> LinkRecord {
        LinkRecord {
            ttl,
            ..LinkRecord::new("https://example.com/", created)
        }
    }

    #[test]
    fn test_missing() {
        assert_eq!(compute_meta(None, 0), LinkMeta::MISSING);
    }

    #[test]
    fn test_permanent_ignores_now() {
        for now in [i64::MIN, -5, 0, 1_000, i64::MAX] {
            for ttl in [None, Some(0)] {
                let meta = compute_meta(Some(&record(100, ttl)), now);
                assert_eq!(meta.status, LinkStatus::Active);
                assert_eq!(meta.expires_at, None);
                assert_eq!(meta.remaining, None);
            }
        }
    }

    #[test]
    fn test_invalid_overrides_ttl() {
        let mut rec = record(0, Some(10));
        rec.valid = Some(false);
        for now in [0, 5, 10, 10_000] {
            let meta = compute_meta(Some(&rec), now);
            assert_eq!(meta.status, LinkStatus::Invalid);
            assert_eq!(meta.expires_at, None);
            assert_eq!(meta.remaining, None);
        }
    }

    #[test]
    fn test_ttl_boundaries() {
        let (c, t) = (1_000_i64, 7_200_u64);
        let rec = record(c, Some(t));
        let exp = c + t as i64;

        let at = |now| compute_meta(Some(&rec), now);

        assert_eq!(at(exp - SOON_THRESHOLD_SECS - 1).status, LinkStatus::Active);
        // 恰好剩 1 小时算 expiring
        assert_eq!(at(exp - SOON_THRESHOLD_SECS).status, LinkStatus::Expiring);
        assert_eq!(at(exp - SOON_THRESHOLD_SECS).remaining, Some(3600));
        assert_eq!(at(exp - 1).status, LinkStatus::Expiring);
        assert_eq!(at(exp - 1).remaining, Some(1));

        let expired = at(exp);
        assert_eq!(expired.status, LinkStatus::Expired);
        assert_eq!(expired.remaining, Some(0));
        assert_eq!(expired.expires_at, Some(exp));
        assert_eq!(at(exp + 99_999).remaining, Some(0));
    }

    #[test]
    fn test_status_partition_matches_formula() {
        let (c, t) = (50_i64, 4_000_u64);
        let rec = record(c, Some(t));
        let exp = c + t as i64;
        for now in (c - 10)..(exp + 10) {
            let expected = if now >= exp {
                LinkStatus::Expired
            } else if now >= exp - 3600 {
                LinkStatus::Expiring
            } else {
                LinkStatus::Active
            };
            assert_eq!(compute_meta(Some(&rec), now).status, expected, "now={now}");
        }
    }

    #[test]
    fn test_explicit_valid_true_is_live() {
        let mut rec = record(0, None);
        rec.valid = Some(true);
        assert_eq!(compute_meta(Some(&rec), 0).status, LinkStatus::Active);
    }
}
