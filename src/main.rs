use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weakfish::{Analyzer, EngineHandle, UciEngine, config::Config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    if config.list_options {
        return list_options(&config.engine_path);
    }

    // Started on the first request that needs it.
    let engine = Arc::new(EngineHandle::uci(config.engine_path.clone()));
    let app = server::router(engine.clone(), config.turn_settings());

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, engine = %config.engine_path, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tokio::task::spawn_blocking(move || engine.shutdown()).await?;
    Ok(())
}

/// Print what the engine advertises, with the `UCI_Elo` range that bounds
/// the limiter ratings.
fn list_options(path: &str) -> anyhow::Result<()> {
    let mut engine = UciEngine::spawn(path)?;
    println!("Engine: {}", engine.name().unwrap_or(path));
    println!();
    println!("Available options:");
    for option in engine.options() {
        let mut line = format!("  {} ({})", option.name, option.kind);
        if let Some(default) = &option.default {
            line.push_str(&format!(" default={default}"));
        }
        if let (Some(min), Some(max)) = (option.min, option.max) {
            line.push_str(&format!(" range={min}..={max}"));
        }
        println!("{line}");
    }

    match engine.options().iter().find(|o| o.name == "UCI_Elo") {
        Some(elo) => println!(
            "\nUCI_Elo: min={:?} max={:?} default={:?}",
            elo.min, elo.max, elo.default
        ),
        None => println!("\nUCI_Elo option not found!"),
    }

    engine.quit()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
