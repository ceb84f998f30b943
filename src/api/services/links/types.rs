//! Link API 类型定义

use serde::{Deserialize, Serialize};

/// 统一响应外壳：`{"code": 0, "message": "OK", "data": ...}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// `GET /api/links` 查询参数
///
/// `limit` 保持字符串，非数字时回落到默认页大小。
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ListLinksQuery {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub expand: Option<String>,
}

impl ListLinksQuery {
    /// Only `expand=1` turns expansion on.
    pub fn expand(&self) -> bool {
        self.expand.as_deref() == Some("1")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStoreCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub store: HealthStoreCheck,
    pub response_time_ms: u32,
}
