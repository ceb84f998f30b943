//! Link API 路由配置

use actix_web::web;

use super::handlers::{create_link, get_link, list_links, patch_link};

/// 链接管理路由 `/api/links`
///
/// 包含：
/// - GET/HEAD /api/links - 分页列出短码（`expand=1` 展开详情）
/// - POST /api/links - 创建链接
/// - GET/HEAD /api/links/{code} - 获取单个链接
/// - PATCH /api/links/{code} - 作废 / 恢复 / 修改 TTL / 修改跳转页
pub fn links_routes() -> actix_web::Scope {
    web::scope("/api/links")
        .route("", web::get().to(list_links))
        .route("", web::head().to(list_links))
        .route("", web::post().to(create_link))
        .route("/{code}", web::get().to(get_link))
        .route("/{code}", web::head().to(get_link))
        .route("/{code}", web::patch().to(patch_link))
}
