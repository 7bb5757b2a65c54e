use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use clap::Parser;
use odsview_core::OdsViewConfig;
use odsview_server::{AppState, configure};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "odsview-server")]
#[command(
    about = "Serve the table viewer and convert uploaded ODS files to JSON",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served for paths other than /convert_ods
    #[arg(long, value_name = "DIR")]
    static_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = OdsViewConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let mut server = config.server;
    if let Some(bind) = cli.bind {
        server.bind = bind;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        server.static_dir = static_dir;
    }

    let state = web::Data::new(AppState::from(&server));

    let http = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, state.clone()))
    })
    .workers(server.workers)
    .bind((server.bind.as_str(), server.port))
    .with_context(|| format!("Failed to bind {}:{}", server.bind, server.port))?;

    log::info!("Server running on http://localhost:{}/", server.port);
    http.run().await?;
    Ok(())
}
