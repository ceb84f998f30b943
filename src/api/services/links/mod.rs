//! Link API 服务模块
//!
//! JSON 接口，鉴权由前置网关负责。

pub mod error_code;
mod handlers;
mod helpers;
pub mod routes;
mod types;

pub use error_code::ErrorCode;
pub use handlers::{create_link, get_link, list_links, patch_link};
pub use helpers::{api_result, error_from_waypoint, error_response, public_origin, success_response};
pub use routes::links_routes;
pub use types::*;
