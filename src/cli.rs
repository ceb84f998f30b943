//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Waypoint - a small URL shortener with expiring links and an interstitial page
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(version)]
#[command(about = "A small URL shortener with expiring links", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Add a short link
    ///
    /// Usage: add [SHORT_CODE] <TARGET_URL>
    /// - If only URL provided, generates random short code
    /// - If both provided, uses specified short code
    Add {
        /// Positional args: [short_code] <target_url>
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,

        /// Lifetime in hours (fractions allowed)
        #[arg(long)]
        ttl_hours: Option<f64>,

        /// Show the countdown page before redirecting
        #[arg(long)]
        interstitial: bool,

        /// Countdown length in seconds
        #[arg(long)]
        seconds: Option<i64>,
    },

    /// Show a short link and its current status
    Get {
        /// Short code
        code: String,
    },

    /// Print the target URL of a live link (fails for expired or invalidated links)
    Resolve {
        /// Short code
        code: String,
    },

    /// List short links one page at a time
    List {
        #[arg(long)]
        limit: Option<i64>,

        /// Cursor returned by the previous page
        #[arg(long)]
        cursor: Option<String>,

        /// Include full metadata for every row
        #[arg(long)]
        expand: bool,
    },

    /// Change a link's lifecycle, TTL or interstitial settings
    Patch {
        /// Short code
        code: String,

        /// `invalidate` or `restore`
        #[arg(long)]
        action: Option<String>,

        /// New lifetime in hours counted from now, or `none` to make permanent
        #[arg(long)]
        ttl_hours: Option<String>,

        #[arg(long)]
        interstitial: Option<bool>,

        #[arg(long, allow_negative_numbers = true)]
        seconds: Option<i64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_code() {
        let cli = Cli::parse_from(["waypoint", "add", "docs", "https://example.com", "--ttl-hours", "2"]);
        match cli.command {
            Some(Commands::Add {
                args, ttl_hours, ..
            }) => {
                assert_eq!(args, vec!["docs", "https://example.com"]);
                assert_eq!(ttl_hours, Some(2.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::parse_from(["waypoint", "resolve", "docs"]);
        assert!(matches!(cli.command, Some(Commands::Resolve { code }) if code == "docs"));
    }

    #[test]
    fn test_parse_patch_flags() {
        let cli = Cli::parse_from([
            "waypoint",
            "-c",
            "custom.toml",
            "patch",
            "abc",
            "--ttl-hours",
            "none",
            "--interstitial",
            "false",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::Patch {
                code,
                ttl_hours,
                interstitial,
                ..
            }) => {
                assert_eq!(code, "abc");
                assert_eq!(ttl_hours.as_deref(), Some("none"));
                assert_eq!(interstitial, Some(false));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_command_is_none() {
        let cli = Cli::parse_from(["waypoint"]);
        assert!(cli.command.is_none());
    }
}
