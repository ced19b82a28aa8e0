//! Server binary: reads configuration from the environment, prepares the
//! database, and serves the appointment routes until Ctrl-C or SIGTERM.

use clinic_appointments::{
    app, ensure_appointments_table, ensure_database_exists, AppState, PgAppointmentStore,
    ServerConfig,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clinic_appointments=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let options = config.connect_options()?;
    if config.create_database {
        ensure_database_exists(&options).await?;
    }
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    ensure_appointments_table(&pool).await?;

    let state = AppState::new(PgAppointmentStore::new(pool.clone()));
    let router = app(state, &config.cors_allow_origins);

    let listener = TcpListener::bind(config.listen_addr()?).await?;
    tracing::info!("dental clinic backend listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
