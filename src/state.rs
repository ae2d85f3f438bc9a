//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::config::planning::PlanningConfig;
use crate::repositories::trip_repository::TripRepository;
use crate::services::mapbox_directions_service::DirectionsProvider;
use crate::services::trip_planning_service::TripPlanningService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub planner: TripPlanningService,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        planning: PlanningConfig,
        repository: Arc<dyn TripRepository>,
        provider: Option<Arc<dyn DirectionsProvider>>,
    ) -> Self {
        Self {
            config,
            planner: TripPlanningService::new(repository, provider, planning),
        }
    }
}
