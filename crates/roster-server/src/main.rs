//! # Roster Server
//!
//! Entry point for the Roster employee directory service.

use anyhow::Context;
use roster_config::ConfigLoader;
use roster_rest::create_router_from_module;
use roster_server::{
    di::{build_module, ServiceResolver},
    startup::print_startup_info,
    telemetry::{init_logging, install_metrics_recorder, metrics_router},
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {:#}", e);
        eprintln!("Application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ConfigLoader::from_default_location()
        .load()
        .context("Failed to load configuration")?;

    init_logging(&config.observability);
    info!("Starting Roster server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let module = build_module(&config).await?;
    let db_pool = module.database_pool();

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let mut router = create_router_from_module(module.as_ref(), &config.server);
    if config.observability.metrics_enabled {
        let handle = install_metrics_recorder()?;
        router = router.merge(metrics_router(handle, &config.observability.metrics_path));
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    print_startup_info(&config);
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
