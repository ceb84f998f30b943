pub mod health;
pub mod links;
pub mod pages;
pub mod redirect;
pub mod site;

pub use health::{AppStartTime, HealthService, health_routes};
pub use links::links_routes;
pub use redirect::{RedirectService, redirect_routes};
pub use site::{SiteService, site_routes};

use std::sync::Arc;

use actix_web::web;

use crate::services::LinkService;

/// Register every route on an app. Order matters: `/{code}` comes last among
/// the single-segment routes.
pub fn configure(service: Arc<LinkService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(service))
            .app_data(web::Data::new(AppStartTime::now()))
            .service(links_routes())
            .service(health_routes())
            .configure(site_routes)
            .service(redirect_routes())
            .default_service(web::to(SiteService::not_found));
    }
}
