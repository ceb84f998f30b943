//! Request body validation
//!
//! Bodies arrive as loosely typed JSON or form fields. Every field is checked
//! here and turned into a typed request before the engine sees it; a field can
//! be absent, explicitly null, or carry a value, and those cases mean
//! different things for PATCH.

use serde_json::{Map, Value};

use crate::errors::{Result, WaypointError};
use crate::services::mutation::{InterstitialChange, LifecycleAction, LinkPatch, TtlChange};

pub type RequestBody = Map<String, Value>;

/// Decode a raw body into a field map.
///
/// Form bodies are parsed as `application/x-www-form-urlencoded`, everything
/// else as JSON. An empty body is an empty map; anything that is not a JSON
/// object is rejected.
pub fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> Result<RequestBody> {
    let is_form = content_type
        .map(|ct| ct.contains("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    if is_form {
        let body = url::form_urlencoded::parse(bytes)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        return Ok(body);
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestBody::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(WaypointError::invalid_input(
            "Request body must be a JSON object",
        )),
        Err(e) => Err(WaypointError::invalid_input(format!(
            "Malformed JSON body: {}",
            e
        ))),
    }
}

/// Presence of a single body field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Absent,
    Null,
    Value(&'a Value),
}

impl<'a> Field<'a> {
    pub fn of(body: &'a RequestBody, key: &str) -> Self {
        match body.get(key) {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(v) => Field::Value(v),
        }
    }

    /// Absent, null and the empty string all count as "not given".
    fn is_blank(&self) -> bool {
        match self {
            Field::Absent | Field::Null => true,
            Field::Value(Value::String(s)) => s.is_empty(),
            Field::Value(_) => false,
        }
    }
}

/// Numbers and numeric strings. Booleans, arrays and objects are not numbers.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `true` or any casing of `"true"`; everything else is false.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn number_field(field: Field<'_>, invalid: impl FnOnce(String) -> WaypointError) -> Result<f64> {
    match field {
        Field::Value(v) => as_number(v).ok_or_else(|| invalid(format!("expected a number, got {}", v))),
        Field::Absent | Field::Null => Err(invalid("expected a number".into())),
    }
}

fn interstitial_fields(body: &RequestBody) -> Result<InterstitialChange> {
    let enabled = match Field::of(body, "interstitial_enabled") {
        Field::Absent | Field::Null => None,
        Field::Value(v) => Some(to_bool(v)),
    };

    let seconds_field = Field::of(body, "interstitial_seconds");
    let seconds = if seconds_field.is_blank() {
        None
    } else {
        let n = number_field(seconds_field, |m| {
            WaypointError::invalid_seconds(format!("interstitial_seconds: {}", m))
        })?;
        if !n.is_finite() {
            return Err(WaypointError::invalid_seconds(
                "interstitial_seconds must be finite",
            ));
        }
        // `as` saturates
        Some(n.floor() as i64)
    };

    Ok(InterstitialChange { enabled, seconds })
}

/// Initial TTL on create, in either unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialTtl {
    Hours(f64),
    Seconds(f64),
}

/// Validated create request. The URL is normalised by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateLinkRequest {
    pub url: String,
    /// Custom code (trimmed); generated when `None`.
    pub code: Option<String>,
    pub ttl: Option<InitialTtl>,
    pub interstitial: InterstitialChange,
}

impl CreateLinkRequest {
    pub fn from_body(body: &RequestBody) -> Result<Self> {
        let url = match Field::of(body, "url") {
            Field::Value(Value::String(s)) => s.clone(),
            Field::Absent | Field::Null => String::new(),
            Field::Value(_) => return Err(WaypointError::invalid_url("url must be a string")),
        };

        let code = match Field::of(body, "code") {
            Field::Value(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Field::Absent | Field::Null => None,
            Field::Value(_) => return Err(WaypointError::invalid_code("code must be a string")),
        };

        let hours = Field::of(body, "ttl_hours");
        let secs = Field::of(body, "ttl");
        let ttl = if !hours.is_blank() {
            Some(InitialTtl::Hours(number_field(hours, |m| {
                WaypointError::invalid_ttl(format!("ttl_hours: {}", m))
            })?))
        } else if !secs.is_blank() {
            Some(InitialTtl::Seconds(number_field(secs, |m| {
                WaypointError::invalid_ttl(format!("ttl: {}", m))
            })?))
        } else {
            None
        };

        Ok(Self {
            url,
            code,
            ttl,
            interstitial: interstitial_fields(body)?,
        })
    }
}

impl LinkPatch {
    /// Validate a PATCH body. Checked in the order the update is applied:
    /// action, then `ttl_hours`, then interstitial fields.
    pub fn from_body(body: &RequestBody) -> Result<Self> {
        let action = match Field::of(body, "action") {
            Field::Absent | Field::Null => None,
            Field::Value(Value::String(s)) => Some(LifecycleAction::parse(s)?),
            Field::Value(other) => {
                return Err(WaypointError::invalid_action(format!(
                    "Unknown action {}",
                    other
                )));
            }
        };

        let hours = Field::of(body, "ttl_hours");
        let ttl = match hours {
            Field::Absent => None,
            // 显式 null 或空串：改为永久
            _ if hours.is_blank() => Some(TtlChange::Clear),
            _ => Some(TtlChange::SetHours(number_field(hours, |m| {
                WaypointError::invalid_ttl(format!("ttl_hours: {}", m))
            })?)),
        };

        Ok(Self {
            action,
            ttl,
            interstitial: interstitial_fields(body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> RequestBody {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    #[test]
    fn test_decode_json_and_form() {
        let map = decode_body(Some("application/json"), br#"{"url":"a.io"}"#).unwrap();
        assert_eq!(map["url"], "a.io");

        let map = decode_body(
            Some("application/x-www-form-urlencoded; charset=utf-8"),
            b"url=https%3A%2F%2Fa.io&interstitial_enabled=true",
        )
        .unwrap();
        assert_eq!(map["url"], "https://a.io");
        assert_eq!(map["interstitial_enabled"], "true");

        assert!(decode_body(None, b"  ").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        for raw in [&b"[1,2]"[..], b"\"text\"", b"{broken", b"42"] {
            assert!(matches!(
                decode_body(Some("application/json"), raw),
                Err(WaypointError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_create_fields() {
        let req = CreateLinkRequest::from_body(&body(json!({
            "url": "example.com",
            "code": "  mine  ",
            "ttl_hours": "1.5",
            "interstitial_enabled": "TRUE",
            "interstitial_seconds": 7.9,
            "unknown": [1, 2, 3]
        })))
        .unwrap();
        assert_eq!(req.url, "example.com");
        assert_eq!(req.code.as_deref(), Some("mine"));
        assert_eq!(req.ttl, Some(InitialTtl::Hours(1.5)));
        assert_eq!(req.interstitial.enabled, Some(true));
        assert_eq!(req.interstitial.seconds, Some(7));
    }

    #[test]
    fn test_create_ttl_fallbacks() {
        let req = CreateLinkRequest::from_body(&body(json!({"url": "a.io", "ttl_hours": "", "ttl": 60})))
            .unwrap();
        assert_eq!(req.ttl, Some(InitialTtl::Seconds(60.0)));

        let req = CreateLinkRequest::from_body(&body(json!({"url": "a.io", "ttl_hours": null})))
            .unwrap();
        assert_eq!(req.ttl, None);

        assert!(matches!(
            CreateLinkRequest::from_body(&body(json!({"url": "a.io", "ttl_hours": "soon"}))),
            Err(WaypointError::InvalidTtl(_))
        ));
    }

    #[test]
    fn test_create_blank_code_is_generated() {
        let req = CreateLinkRequest::from_body(&body(json!({"url": "a.io", "code": "   "}))).unwrap();
        assert_eq!(req.code, None);
    }

    #[test]
    fn test_create_rejects_wrong_types() {
        assert!(matches!(
            CreateLinkRequest::from_body(&body(json!({"url": 5}))),
            Err(WaypointError::InvalidUrl(_))
        ));
        assert!(matches!(
            CreateLinkRequest::from_body(&body(json!({"url": "a.io", "code": 123}))),
            Err(WaypointError::InvalidCode(_))
        ));
        assert!(matches!(
            CreateLinkRequest::from_body(&body(json!({"url": "a.io", "interstitial_seconds": true}))),
            Err(WaypointError::InvalidSeconds(_))
        ));
        assert!(matches!(
            CreateLinkRequest::from_body(&body(json!({"url": "a.io", "interstitial_seconds": "inf"}))),
            Err(WaypointError::InvalidSeconds(_))
        ));
    }

    #[test]
    fn test_patch_ttl_tristate() {
        assert_eq!(LinkPatch::from_body(&body(json!({}))).unwrap().ttl, None);
        assert_eq!(
            LinkPatch::from_body(&body(json!({"ttl_hours": null}))).unwrap().ttl,
            Some(TtlChange::Clear)
        );
        assert_eq!(
            LinkPatch::from_body(&body(json!({"ttl_hours": ""}))).unwrap().ttl,
            Some(TtlChange::Clear)
        );
        assert_eq!(
            LinkPatch::from_body(&body(json!({"ttl_hours": 2}))).unwrap().ttl,
            Some(TtlChange::SetHours(2.0))
        );
    }

    #[test]
    fn test_patch_action() {
        assert_eq!(
            LinkPatch::from_body(&body(json!({"action": null}))).unwrap().action,
            None
        );
        assert_eq!(
            LinkPatch::from_body(&body(json!({"action": "restore"})))
                .unwrap()
                .action,
            Some(LifecycleAction::Restore)
        );
        for bad in [json!("INVALIDATE"), json!(""), json!(1), json!(false)] {
            assert!(matches!(
                LinkPatch::from_body(&body(json!({ "action": bad }))),
                Err(WaypointError::InvalidAction(_))
            ));
        }
    }

    #[test]
    fn test_patch_action_checked_before_ttl() {
        let err = LinkPatch::from_body(&body(json!({"action": "nope", "ttl_hours": "x"}))).unwrap_err();
        assert!(matches!(err, WaypointError::InvalidAction(_)));
    }

    #[test]
    fn test_to_bool() {
        assert!(to_bool(&json!(true)));
        assert!(to_bool(&json!("True")));
        assert!(!to_bool(&json!("yes")));
        assert!(!to_bool(&json!(1)));
        assert!(!to_bool(&json!(false)));
    }
}
