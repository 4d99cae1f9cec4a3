// Main entry point
use clap::Parser;
use colored::Colorize;
use gistapi::infrastructure::config::{self, Config, Logging};
use gistapi::interfaces::api::create_router;
use gistapi::interfaces::cli::Cli;
use gistapi::state::AppState;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let mut config = config::load_config()?;
    cli.apply(&mut config);
    config.validate()?;

    if cli.status {
        print_status(&config);
        return Ok(());
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let addr = config.bind_addr()?;
    let sweep_every = Duration::from_secs(config.cache.sweep_interval_secs.max(1));
    let state = AppState::new(config)?;

    // Evict expired results in the background; lookups also evict lazily.
    let cache = state.cache.clone();
    let sweeper = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, remaining = cache.len(), "purged expired cache entries");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "gistapi listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn print_status(config: &Config) {
    println!("{}", "gistapi Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found (using defaults)".to_string())
    );
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!(
        "Cache: ttl {}s, sweep every {}s",
        config.cache.ttl_secs, config.cache.sweep_interval_secs
    );
    println!(
        "Upstream: {} ({} per page, {} concurrent, {}s timeout)",
        config.upstream.api_base,
        config.upstream.per_page,
        config.upstream.concurrency,
        config.upstream.timeout_secs
    );
    if config.logging.enable {
        println!(
            "Logging: {} -> {}",
            config.logging.filter_directive(),
            config.logging.path.as_deref().unwrap_or("stderr")
        );
    } else {
        println!("Logging: {}", "disabled".yellow());
    }
}
