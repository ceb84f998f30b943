//! Landing page, admin page, favicon and the catch-all 404.

use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::trace;

use crate::api::services::pages::{FAVICON_SVG, admin_page, landing_page, not_found_page};
use crate::config::get_config;

pub struct SiteService;

impl SiteService {
    pub async fn landing() -> impl Responder {
        let config = get_config();
        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(landing_page(&config.site.author, &config.site.contact).into_string())
    }

    pub async fn admin() -> impl Responder {
        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .insert_header((CACHE_CONTROL, "no-store"))
            .body(admin_page().into_string())
    }

    pub async fn favicon() -> impl Responder {
        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "image/svg+xml; charset=utf-8"))
            .insert_header((CACHE_CONTROL, "public, max-age=86400"))
            .body(FAVICON_SVG)
    }

    pub async fn not_found(req: HttpRequest) -> impl Responder {
        trace!("No route for {} {}", req.method(), req.path());
        let info = req.connection_info();
        let home = format!("{}://{}/", info.scheme(), info.host());
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(not_found_page(&home).into_string())
    }
}

/// `/`、`/admin`、`/favicon.ico`、`/favicon.svg`
///
/// Paths here that look like a short code must also be listed in
/// [`RESERVED_CODES`](crate::services::allocator::RESERVED_CODES).
pub fn site_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(SiteService::landing))
        .route("/", web::head().to(SiteService::landing))
        .route("/admin", web::get().to(SiteService::admin))
        .route("/favicon.ico", web::get().to(SiteService::favicon))
        .route("/favicon.svg", web::get().to(SiteService::favicon));
}
