//! Gatehouse login gateway server binary.
//!
//! Owns the process lifecycle: configuration, the store handle, the
//! startup initialization (degrade, don't crash), the recurring expiry
//! sweep, and graceful shutdown.

use std::time::Duration;

use clap::Parser;
use gatehouse_api::config::ApiConfig;
use gatehouse_core::auth::remember_tokens::TokenLedger;
use gatehouse_core::auth::session::SessionBridge;
use gatehouse_core::db::{Store, StoreConfig};
use tracing::{error, info, warn};

/// CLI arguments for the gateway server.
#[derive(Parser, Debug)]
#[command(name = "gatehouse_server", about = "Gatehouse login gateway server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3200)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/gatehouse"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Pool acquire / operation timeout in seconds.
    #[arg(long, default_value_t = 30)]
    acquire_timeout_secs: u64,

    /// Remember-me token lifetime in days.
    #[arg(long, env = "REMEMBER_DAYS", default_value_t = 30)]
    remember_days: u32,

    /// Interval between expiry sweeps in seconds (0 disables the
    /// recurring sweep; the startup sweep still runs).
    #[arg(long, default_value_t = 3600)]
    sweep_interval_secs: u64,

    /// Mark the remember-me cookie `Secure` (requires TLS at the edge).
    #[arg(long, env = "SECURE_COOKIES", default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,gatehouse_api=debug,gatehouse_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, port = args.port, "starting gatehouse_server");

    let mut store_config = StoreConfig::new(args.database_url.clone());
    store_config.max_connections = args.max_connections;
    store_config.acquire_timeout = Duration::from_secs(args.acquire_timeout_secs);
    let store = Store::connect(&store_config)?;

    let ledger = TokenLedger::new(store.clone());

    // Degrade, don't crash: an unreachable store disables the remember-me
    // convenience, not the login service.
    match ledger.initialize().await {
        Ok(()) => info!("token ledger initialized"),
        Err(e) => error!(
            error = %e,
            "store unreachable at startup; serving with remember-me persistence degraded"
        ),
    }

    if args.sweep_interval_secs > 0 {
        let sweeper = ledger.clone();
        let period = Duration::from_secs(args.sweep_interval_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately; the startup sweep already ran.
            interval.tick().await;
            loop {
                interval.tick().await;
                match sweeper.sweep_expired().await {
                    Ok(swept) if swept > 0 => info!(swept, "expiry sweep removed tokens"),
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "expiry sweep failed"),
                }
            }
        });
    }

    let config = ApiConfig {
        bind_addr: format!("127.0.0.1:{}", args.port),
        remember_days: args.remember_days,
        secure_cookies: args.secure_cookies,
    };

    let bridge = SessionBridge::new(ledger, args.remember_days);
    let state = gatehouse_api::AppState {
        store: store.clone(),
        bridge,
        config: config.clone(),
    };
    let app = gatehouse_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "gatehouse listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("draining connection pool");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
