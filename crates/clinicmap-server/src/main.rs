mod api;
mod middleware;

use std::sync::Arc;

use clinicmap_geocode::GeocodeResolver;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = clinicmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let clinics = clinicmap_core::load_clinics(&config.clinics_path)?;
    tracing::info!(
        env = %config.env,
        clinics = clinics.clinics.len(),
        path = %config.clinics_path.display(),
        "clinic data loaded"
    );

    let resolver = GeocodeResolver::from_config(&config.geocoder);
    if !resolver.is_enabled() {
        tracing::warn!("MAPBOX_ACCESS_TOKEN not set; map routes will return the location list");
    }

    let state = AppState {
        clinics: Arc::new(clinics.clinics),
        resolver: Arc::new(resolver),
        page_size: config.page_size,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
