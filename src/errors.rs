use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaypointError {
    InvalidUrl(String),
    InvalidCode(String),
    InvalidTtl(String),
    InvalidSeconds(String),
    InvalidAction(String),
    InvalidInput(String),
    Conflict(String),
    NotFound(String),
    Gone(String),
    AllocationExhausted(String),
    StoreOperation(String),
    Serialization(String),
    Config(String),
    FileOperation(String),
}

impl WaypointError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            WaypointError::InvalidUrl(_) => "E001",
            WaypointError::InvalidCode(_) => "E002",
            WaypointError::InvalidTtl(_) => "E003",
            WaypointError::InvalidSeconds(_) => "E004",
            WaypointError::InvalidAction(_) => "E005",
            WaypointError::InvalidInput(_) => "E006",
            WaypointError::Conflict(_) => "E007",
            WaypointError::NotFound(_) => "E008",
            WaypointError::Gone(_) => "E009",
            WaypointError::AllocationExhausted(_) => "E010",
            WaypointError::StoreOperation(_) => "E011",
            WaypointError::Serialization(_) => "E012",
            WaypointError::Config(_) => "E013",
            WaypointError::FileOperation(_) => "E014",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            WaypointError::InvalidUrl(_) => "Invalid URL",
            WaypointError::InvalidCode(_) => "Invalid Code Format",
            WaypointError::InvalidTtl(_) => "Invalid TTL",
            WaypointError::InvalidSeconds(_) => "Invalid Interstitial Seconds",
            WaypointError::InvalidAction(_) => "Invalid Action",
            WaypointError::InvalidInput(_) => "Invalid Input",
            WaypointError::Conflict(_) => "Code Already In Use",
            WaypointError::NotFound(_) => "Link Not Found",
            WaypointError::Gone(_) => "Link Gone",
            WaypointError::AllocationExhausted(_) => "Code Allocation Exhausted",
            WaypointError::StoreOperation(_) => "Store Operation Error",
            WaypointError::Serialization(_) => "Serialization Error",
            WaypointError::Config(_) => "Configuration Error",
            WaypointError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            WaypointError::InvalidUrl(msg)
            | WaypointError::InvalidCode(msg)
            | WaypointError::InvalidTtl(msg)
            | WaypointError::InvalidSeconds(msg)
            | WaypointError::InvalidAction(msg)
            | WaypointError::InvalidInput(msg)
            | WaypointError::Conflict(msg)
            | WaypointError::NotFound(msg)
            | WaypointError::Gone(msg)
            | WaypointError::AllocationExhausted(msg)
            | WaypointError::StoreOperation(msg)
            | WaypointError::Serialization(msg)
            | WaypointError::Config(msg)
            | WaypointError::FileOperation(msg) => msg,
        }
    }

    /// HTTP status the API layer answers with.
    ///
    /// 404 (absent) and 410 (expired or soft-deleted) are kept apart.
    pub fn http_status(&self) -> StatusCode {
        match self {
            WaypointError::InvalidUrl(_)
            | WaypointError::InvalidCode(_)
            | WaypointError::InvalidTtl(_)
            | WaypointError::InvalidSeconds(_)
            | WaypointError::InvalidAction(_)
            | WaypointError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            WaypointError::Conflict(_) => StatusCode::CONFLICT,
            WaypointError::NotFound(_) => StatusCode::NOT_FOUND,
            WaypointError::Gone(_) => StatusCode::GONE,
            WaypointError::AllocationExhausted(_)
            | WaypointError::StoreOperation(_)
            | WaypointError::Serialization(_)
            | WaypointError::Config(_)
            | WaypointError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for WaypointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for WaypointError {}

// 便捷的构造函数
impl WaypointError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidUrl(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidCode(msg.into())
    }

    pub fn invalid_ttl<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidTtl(msg.into())
    }

    pub fn invalid_seconds<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidSeconds(msg.into())
    }

    pub fn invalid_action<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidAction(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        WaypointError::InvalidInput(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        WaypointError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        WaypointError::NotFound(msg.into())
    }

    pub fn gone<T: Into<String>>(msg: T) -> Self {
        WaypointError::Gone(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        WaypointError::AllocationExhausted(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        WaypointError::StoreOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        WaypointError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        WaypointError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        WaypointError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<redis::RedisError> for WaypointError {
    fn from(err: redis::RedisError) -> Self {
        WaypointError::StoreOperation(err.to_string())
    }
}

impl From<std::io::Error> for WaypointError {
    fn from(err: std::io::Error) -> Self {
        WaypointError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for WaypointError {
    fn from(err: serde_json::Error) -> Self {
        WaypointError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WaypointError>;
