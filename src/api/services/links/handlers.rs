//! Link API 端点

use std::sync::Arc;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{trace, warn};

use crate::config::get_config;
use crate::errors::WaypointError;
use crate::services::LinkService;
use crate::services::listing::{PageRequest, parse_limit};
use crate::services::mutation::LinkPatch;
use crate::services::request::{CreateLinkRequest, RequestBody, decode_body};

use super::helpers::{api_result, error_from_waypoint, public_origin, success_response};
use super::types::ListLinksQuery;

fn read_body(req: &HttpRequest, body: &[u8]) -> Result<RequestBody, WaypointError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    decode_body(content_type, body)
}

fn failure_response(err: WaypointError) -> HttpResponse {
    if err.is_client_error() {
        trace!("Link API: rejected request: {}", err);
    } else {
        warn!("Link API: request failed: {}", err);
    }
    error_from_waypoint(&err)
}

/// `POST /api/links`
pub async fn create_link(
    req: HttpRequest,
    body: web::Bytes,
    service: web::Data<Arc<LinkService>>,
) -> impl Responder {
    let parsed = read_body(&req, &body).and_then(|fields| CreateLinkRequest::from_body(&fields));
    let create = match parsed {
        Ok(create) => create,
        Err(e) => return failure_response(e),
    };

    let config = get_config();
    let origin = public_origin(&req, config.server.public_base_url.as_deref());

    match service.create_link(create, &origin).await {
        Ok(created) => success_response(created),
        Err(e) => failure_response(e),
    }
}

/// `GET /api/links?limit=&cursor=&expand=1`
pub async fn list_links(
    query: web::Query<ListLinksQuery>,
    service: web::Data<Arc<LinkService>>,
) -> impl Responder {
    trace!("Link API: list request {:?}", query);

    let page = PageRequest {
        limit: parse_limit(query.limit.as_deref()),
        cursor: query.cursor.clone().filter(|c| !c.is_empty()),
        expand: query.expand(),
    };

    api_result(service.list_links(page).await)
}

/// `GET /api/links/{code}`
pub async fn get_link(
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> impl Responder {
    let code = path.into_inner();
    trace!("Link API: get '{}'", code);
    api_result(service.get_link(&code).await)
}

/// `PATCH /api/links/{code}`
pub async fn patch_link(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    service: web::Data<Arc<LinkService>>,
) -> impl Responder {
    let code = path.into_inner();

    let patch = match read_body(&req, &body).and_then(|fields| LinkPatch::from_body(&fields)) {
        Ok(patch) => patch,
        Err(e) => return failure_response(e),
    };

    match service.patch_link(&code, &patch).await {
        Ok(outcome) => success_response(outcome),
        Err(e) => failure_response(e),
    }
}
