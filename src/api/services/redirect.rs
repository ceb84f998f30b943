use std::sync::Arc;

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::api::services::pages::{interstitial_page, invalid_page};
use crate::services::LinkService;
use crate::services::resolver::RedirectOutcome;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        trace!("Redirect lookup: {}", code);

        match service.resolve_redirect(&code).await {
            Ok(outcome) => Self::finish(&req, &code, outcome),
            Err(e) => {
                error!("Store error during redirect lookup for '{}': {}", code, e);
                Self::error_response()
            }
        }
    }

    fn finish(req: &HttpRequest, code: &str, outcome: RedirectOutcome) -> HttpResponse {
        let status = outcome.http_status();
        // 状态随时间变化，不允许缓存
        let mut builder = HttpResponse::build(status);
        builder.insert_header((CACHE_CONTROL, "no-store"));

        match outcome {
            RedirectOutcome::Redirect { url } => {
                builder.insert_header((LOCATION, url)).finish()
            }
            RedirectOutcome::Interstitial { url, seconds } => {
                debug!("Serving interstitial for '{}' ({}s)", code, seconds);
                builder
                    .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                    .body(interstitial_page(&url, seconds).into_string())
            }
            RedirectOutcome::NotFound | RedirectOutcome::Gone => {
                let gone = matches!(outcome, RedirectOutcome::Gone);
                let host = req.connection_info().host().to_string();
                builder
                    .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
                    .body(invalid_page(&host, code, gone).into_string())
            }
        }
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::InternalServerError()
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// 公开跳转路由 `/{code}`，只匹配单段路径
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{code}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
