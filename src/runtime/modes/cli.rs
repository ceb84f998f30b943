//! CLI mode
//!
//! Runs one command against the configured store and prints the result.
//! The in-memory backend only lives for the duration of the command, so the
//! CLI is mostly useful with `store.backend = "redis"`.

use colored::Colorize;
use serde::Serialize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::{StaticConfig, get_config};
use crate::errors::{Result, WaypointError};
use crate::services::LinkService;
use crate::services::listing::PageRequest;
use crate::services::mutation::{InterstitialChange, LifecycleAction, LinkPatch, TtlChange};
use crate::services::request::{CreateLinkRequest, InitialTtl};
use crate::storage::StoreFactory;

/// Run CLI mode
pub async fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Serve => Err(WaypointError::invalid_input(
            "serve is handled by server mode",
        )),
        Commands::Config {
            action: ConfigCommands::Generate { output_path },
        } => generate_config(output_path),
        other => {
            let service = build_service().await?;
            run_link_command(&service, other).await
        }
    }
}

async fn build_service() -> Result<LinkService> {
    let config = get_config();
    let store = StoreFactory::create(&config.store).await?;
    if store.backend_name() == "memory" {
        eprintln!(
            "{} {}",
            "⚠".bold().yellow(),
            "Using the in-memory store: changes are discarded when the command exits".yellow()
        );
    }
    Ok(LinkService::with_store(store, config.links.clone()))
}

fn base_url() -> String {
    let config = get_config();
    match config.server.public_base_url.as_deref() {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => format!("http://{}:{}", config.server.host, config.server.port),
    }
}

async fn run_link_command(service: &LinkService, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            mut args,
            ttl_hours,
            interstitial,
            seconds,
        } => {
            let url = args.pop().unwrap_or_default();
            let code = args.pop();
            let req = CreateLinkRequest {
                url,
                code,
                ttl: ttl_hours.map(InitialTtl::Hours),
                interstitial: InterstitialChange {
                    enabled: interstitial.then_some(true),
                    seconds,
                },
            };
            let created = service.create_link(req, &base_url()).await?;
            println!(
                "{} Added short link: {} -> {}",
                "✓".bold().green(),
                created.short.cyan(),
                created.link.url.blue().underline()
            );
            print_json(&created)
        }
        Commands::Get { code } => {
            let view = service.get_link(&code).await?;
            print_json(&view)
        }
        Commands::Resolve { code } => {
            let url = service.follow_link(&code).await?;
            println!("{}", url);
            Ok(())
        }
        Commands::List {
            limit,
            cursor,
            expand,
        } => {
            let page = service
                .list_links(PageRequest {
                    limit,
                    cursor,
                    expand,
                })
                .await?;
            print_json(&page)
        }
        Commands::Patch {
            code,
            action,
            ttl_hours,
            interstitial,
            seconds,
        } => {
            let patch = LinkPatch {
                action: action.as_deref().map(LifecycleAction::parse).transpose()?,
                ttl: ttl_hours.as_deref().map(parse_ttl_change).transpose()?,
                interstitial: InterstitialChange {
                    enabled: interstitial,
                    seconds,
                },
            };
            let outcome = service.patch_link(&code, &patch).await?;
            println!(
                "{} Updated {} ({})",
                "✓".bold().green(),
                outcome.code.cyan(),
                outcome.status.to_string().yellow()
            );
            print_json(&outcome)
        }
        Commands::Serve | Commands::Config { .. } => Ok(()),
    }
}

/// `none` (or an empty value) makes the link permanent; anything else is hours.
fn parse_ttl_change(raw: &str) -> Result<TtlChange> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(TtlChange::Clear);
    }
    trimmed
        .parse::<f64>()
        .map(TtlChange::SetHours)
        .map_err(|_| WaypointError::invalid_ttl(format!("ttl_hours must be a number, got '{}'", raw)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Generate example configuration file
fn generate_config(output_path: Option<String>) -> Result<()> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| WaypointError::file_operation(format!("Unable to write {}: {}", path, e)))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_change() {
        assert_eq!(parse_ttl_change("none").unwrap(), TtlChange::Clear);
        assert_eq!(parse_ttl_change("").unwrap(), TtlChange::Clear);
        assert_eq!(parse_ttl_change("1.5").unwrap(), TtlChange::SetHours(1.5));
        assert!(matches!(
            parse_ttl_change("soon"),
            Err(WaypointError::InvalidTtl(_))
        ));
    }

    #[tokio::test]
    async fn test_add_then_get_in_memory() {
        let service = build_service().await.unwrap();
        let add = Commands::Add {
            args: vec!["cli-demo".to_string(), "example.com".to_string()],
            ttl_hours: None,
            interstitial: false,
            seconds: None,
        };
        run_link_command(&service, add).await.unwrap();

        let view = service.get_link("cli-demo").await.unwrap();
        assert_eq!(view.url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_invalidated_link_is_gone() {
        let service = build_service().await.unwrap();
        let add = Commands::Add {
            args: vec!["cli-gone".to_string(), "example.com".to_string()],
            ttl_hours: None,
            interstitial: false,
            seconds: None,
        };
        run_link_command(&service, add).await.unwrap();

        let resolve = || Commands::Resolve {
            code: "cli-gone".to_string(),
        };
        run_link_command(&service, resolve()).await.unwrap();

        let patch = Commands::Patch {
            code: "cli-gone".to_string(),
            action: Some("invalidate".to_string()),
            ttl_hours: None,
            interstitial: None,
            seconds: None,
        };
        run_link_command(&service, patch).await.unwrap();

        assert!(matches!(
            run_link_command(&service, resolve()).await,
            Err(WaypointError::Gone(_))
        ));
    }

    #[test]
    fn test_generate_config_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        generate_config(Some(path.to_string_lossy().into_owned())).unwrap();
        assert!(path.exists());
    }
}
