//! Server mode
//!
//! Starts the HTTP server with the link API, health probes, the landing and
//! admin pages and the catch-all redirect route.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::Compress,
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::configure;
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime;

/// Request bodies larger than this are rejected by actix before decoding.
const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// CORS settings resolved from the static config
#[derive(Clone, Debug)]
struct CorsSettings {
    enabled: bool,
    allowed_origins: Vec<String>,
    max_age: usize,
}

impl From<&CorsConfig> for CorsSettings {
    fn from(config: &CorsConfig) -> Self {
        Self {
            enabled: config.enabled,
            allowed_origins: config
                .allowed_origins
                .iter()
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            max_age: config.max_age,
        }
    }
}

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsSettings) {
    if !cors_config.enabled {
        return;
    }

    if cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsSettings) -> Cors {
    // 未启用时保持浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec![Method::GET, Method::HEAD, Method::POST, Method::PATCH])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::LOCATION])
        .max_age(cors_config.max_age)
}

pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup().await?;
    let config = get_config();

    let cors_config = CorsSettings::from(&config.cors);
    validate_cors_config(&cors_config);

    let link_service = startup.link_service.clone();
    let cpu_count = config.server.cpu_count.clamp(1, 32);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(configure(link_service.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!(
        workers = cpu_count,
        "Starting server at http://{}", bind_address
    );
    let server = server.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(startup.store.clone()) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_settings_trim_origins() {
        let config = CorsConfig {
            enabled: true,
            allowed_origins: vec![
                " https://a.example/ ".to_string(),
                "".to_string(),
                "https://b.example".to_string(),
            ],
            max_age: 600,
        };
        let settings = CorsSettings::from(&config);
        assert_eq!(
            settings.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.max_age, 600);
    }

    #[test]
    fn test_build_cors_middleware_variants() {
        let disabled = CorsSettings::from(&CorsConfig::default());
        let _ = build_cors_middleware(&disabled);

        let any = CorsSettings {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            max_age: 60,
        };
        validate_cors_config(&any);
        let _ = build_cors_middleware(&any);
    }
}
