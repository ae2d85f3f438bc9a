use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use hos_trip_planner::config::database::DatabaseConfig;
use hos_trip_planner::config::environment::{EnvironmentConfig, StorageBackend};
use hos_trip_planner::config::planning::PlanningConfig;
use hos_trip_planner::database::connect_and_migrate;
use hos_trip_planner::repositories::{InMemoryTripRepository, PgTripRepository, TripRepository};
use hos_trip_planner::services::mapbox_directions_service::{DirectionsProvider, MapboxDirectionsService};
use hos_trip_planner::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid environment configuration")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 HOS Trip Planner");
    info!("==================");

    let planning = PlanningConfig::from_env().context("invalid HOS planning configuration")?;
    info!(
        "⏱️ HOS rules: {}h driving/day, {}h off duty, up to {} days ({:?})",
        planning.schedule.daily_driving_cap_hours,
        planning.schedule.off_duty_hours,
        planning.schedule.max_days,
        planning.schedule.overflow
    );

    let repository: Arc<dyn TripRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set for the postgres backend")?;
            let pool = connect_and_migrate(&DatabaseConfig::new(url)).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                e
            })?;
            Arc::new(PgTripRepository::new(pool))
        }
        StorageBackend::Memory => {
            warn!("⚠️ Using in-memory storage, trips are lost on restart");
            Arc::new(InMemoryTripRepository::new())
        }
    };

    let provider: Option<Arc<dyn DirectionsProvider>> = match &config.mapbox_token {
        Some(token) => {
            let mut service = MapboxDirectionsService::new(token.clone())?;
            if let Some(base_url) = &config.mapbox_base_url {
                service = service.with_base_url(base_url.clone());
            }
            if let Some(profile) = &config.mapbox_profile {
                service = service.with_profile(profile.clone());
            }
            Some(Arc::new(service))
        }
        None => {
            warn!("⚠️ MAPBOX_ACCESS_TOKEN not set, trip planning will answer 503");
            None
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    let app = create_app(AppState::new(config, planning, repository, provider));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/trips - Listar viajes");
    info!("   POST   /api/trips - Planificar viaje");
    info!("   GET    /api/trips/:id - Obtener viaje");
    info!("   PUT    /api/trips/:id - Actualizar viaje");
    info!("   DELETE /api/trips/:id - Eliminar viaje");
    info!("   GET    /api/trips/:id/days/:day_number/logs - Registro del día");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to listen for Ctrl+C: {}", e);
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
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
