use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use ez_config::EzConfig;
use ez_db::service::EzService;
use ez_server::{AppState, build_router};

mod cli;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ezd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = EzConfig::load_with_dotenv().context("failed to load configuration")?;
    if let cli::Commands::Serve { bind: Some(bind) } = &cli.command {
        config.server.bind.clone_from(bind);
    }
    config.validate().context("invalid configuration")?;

    let service = EzService::from_config(&config.database)
        .await
        .context("failed to open database")?;

    match cli.command {
        cli::Commands::Serve { .. } => serve(config, service).await,
        cli::Commands::SeedTemplates { file } => {
            let summary = service
                .seed_templates_from_file(&file)
                .await
                .with_context(|| format!("failed to seed templates from {}", file.display()))?;
            println!(
                "seeded {} templates ({} already present)",
                summary.inserted, summary.skipped
            );
            Ok(())
        }
    }
}

async fn serve(config: EzConfig, service: EzService) -> anyhow::Result<()> {
    if let Some(path) = config.general.templates_path() {
        service
            .seed_templates_from_file(path)
            .await
            .with_context(|| format!("failed to seed templates from {}", path.display()))?;
    }

    let addr = config.server.socket_addr()?;
    let router = build_router(
        AppState::new(service, config.auth).with_maintenance(config.maintenance),
        config.server.max_body_bytes,
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(error) => {
            warn!(%error, "cannot listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("EZRIYA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
