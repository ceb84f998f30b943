use clap::Parser;

use waypoint::cli::Cli;
use waypoint::config::{get_config, init_config};
use waypoint::runtime::modes::{self, Mode};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    // 保持 guard 存活，否则非阻塞日志不会落盘
    let _log_guard = waypoint::system::init_logging(&get_config().logging)?;

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => {
            if let Err(e) = modes::run_server().await {
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
        Mode::Unknown => {
            eprintln!("No execution mode available. Enable the `server` or `cli` feature.");
            std::process::exit(1);
        }
    }

    Ok(())
}
