//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::WaypointError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkInvalidTtl = 3003,
    LinkStoreError = 3005,
    LinkInvalidCode = 3006,
    LinkGone = 3007,
    LinkInvalidAction = 3008,
    LinkInvalidSeconds = 3009,
    LinkAllocationExhausted = 3010,
}

impl From<&WaypointError> for ErrorCode {
    fn from(err: &WaypointError) -> Self {
        match err {
            WaypointError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            WaypointError::InvalidCode(_) => ErrorCode::LinkInvalidCode,
            WaypointError::InvalidTtl(_) => ErrorCode::LinkInvalidTtl,
            WaypointError::InvalidSeconds(_) => ErrorCode::LinkInvalidSeconds,
            WaypointError::InvalidAction(_) => ErrorCode::LinkInvalidAction,
            WaypointError::InvalidInput(_) => ErrorCode::BadRequest,
            WaypointError::Conflict(_) => ErrorCode::LinkAlreadyExists,
            WaypointError::NotFound(_) => ErrorCode::LinkNotFound,
            WaypointError::Gone(_) => ErrorCode::LinkGone,
            WaypointError::AllocationExhausted(_) => ErrorCode::LinkAllocationExhausted,
            WaypointError::StoreOperation(_) => ErrorCode::LinkStoreError,
            WaypointError::Serialization(_)
            | WaypointError::Config(_)
            | WaypointError::FileOperation(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::LinkAlreadyExists).unwrap(),
            "3001"
        );
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ErrorCode::from(&WaypointError::conflict("x")),
            ErrorCode::LinkAlreadyExists
        );
        assert_eq!(
            ErrorCode::from(&WaypointError::invalid_input("x")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(&WaypointError::gone("x")),
            ErrorCode::LinkGone
        );
    }
}
