//! Servicio de direcciones con Mapbox
//! 
//! Adaptador del proveedor de distancia/duración: geocodifica cada dirección
//! con la API de Geocoding y pide la ruta de conducción que las une con la
//! API de Directions. El núcleo del planificador solo consume la distancia,
//! la duración y los waypoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAPBOX_API_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_PROFILE: &str = "mapbox/driving";

#[derive(Error, Debug)]
pub enum DirectionsError {
    #[error("Could not geocode address: {0}")]
    NotGeocodable(String),

    #[error("At least two locations are required, got {0}")]
    NotEnoughLocations(usize),

    #[error("No route found: {0}")]
    NoRoute(String),

    #[error("Mapbox request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mapbox API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Mapbox response: {0}")]
    Parse(String),
}

/// Punto geográfico (longitud, latitud)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub maneuver_type: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Lo que el planificador necesita del proveedor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub waypoints: Vec<Waypoint>,
    pub steps: Vec<RouteStep>,
}

/// Proveedor de distancia y duración para una lista ordenada de direcciones
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn route(&self, locations: &[String]) -> Result<RouteSummary, DirectionsError>;
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    center: Vec<f64>, // [longitude, latitude]
    place_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MapboxDirectionsResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<MapboxRoute>,
    #[serde(default)]
    waypoints: Vec<MapboxWaypoint>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64, // metros
    duration: f64, // segundos
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    #[serde(default)]
    steps: Vec<MapboxStep>,
}

#[derive(Debug, Deserialize)]
struct MapboxStep {
    distance: f64,
    duration: f64,
    maneuver: MapboxManeuver,
}

#[derive(Debug, Deserialize)]
struct MapboxManeuver {
    #[serde(default)]
    instruction: String,
    #[serde(rename = "type")]
    maneuver_type: String,
}

#[derive(Debug, Deserialize)]
struct MapboxWaypoint {
    #[serde(default)]
    name: String,
    location: Vec<f64>,
}

pub struct MapboxDirectionsService {
    access_token: String,
    base_url: String,
    profile: String,
    client: Client,
}

impl MapboxDirectionsService {
    pub fn new(access_token: String) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("HosTripPlanner/1.0")
            .build()?;

        Ok(Self {
            access_token,
            base_url: MAPBOX_API_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            client,
        })
    }

    /// Cambiar la URL base (proxy o servidor local)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Convertir una dirección en coordenadas
    pub async fn geocode_address(&self, address: &str) -> Result<Coordinates, DirectionsError> {
        log::info!("🗺️ Geocoding address: {}", address);

        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json?limit=1&access_token={}",
            self.base_url,
            urlencoding::encode(address),
            self.access_token
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("❌ Geocoding failed with status {}: {}", status, body);
            return Err(DirectionsError::Status { status: status.as_u16(), body });
        }

        let coordinates = parse_geocoding_response(&body, address)?;
        log::info!(
            "✅ Geocoding successful: {} -> ({}, {})",
            address,
            coordinates.latitude,
            coordinates.longitude
        );
        Ok(coordinates)
    }

    /// Pedir la ruta que une las coordenadas en orden
    pub async fn directions(&self, coordinates: &[Coordinates]) -> Result<RouteSummary, DirectionsError> {
        if coordinates.len() < 2 {
            return Err(DirectionsError::NotEnoughLocations(coordinates.len()));
        }

        let path = coordinates
            .iter()
            .map(|c| format!("{},{}", c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .join(";");

        log::info!("🚚 Requesting {} directions for {} waypoints", self.profile, coordinates.len());

        let url = format!(
            "{}/directions/v5/{}/{}?geometries=geojson&steps=true&overview=full&access_token={}",
            self.base_url, self.profile, path, self.access_token
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        log::debug!("📡 Directions response status: {}", status);

        if !status.is_success() {
            log::error!("❌ Directions API error {}: {}", status, body);
            return Err(DirectionsError::Status { status: status.as_u16(), body });
        }

        parse_directions_response(&body)
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirectionsService {
    async fn route(&self, locations: &[String]) -> Result<RouteSummary, DirectionsError> {
        if locations.len() < 2 {
            return Err(DirectionsError::NotEnoughLocations(locations.len()));
        }

        let coordinates =
            futures::future::try_join_all(locations.iter().map(|l| self.geocode_address(l))).await?;

        let summary = self.directions(&coordinates).await?;
        log::info!(
            "📍 Route found: {:.0} m, {:.0} s, {} steps",
            summary.distance_meters,
            summary.duration_seconds,
            summary.steps.len()
        );
        Ok(summary)
    }
}

fn parse_geocoding_response(body: &str, address: &str) -> Result<Coordinates, DirectionsError> {
    let response: MapboxGeocodingResponse =
        serde_json::from_str(body).map_err(|e| DirectionsError::Parse(e.to_string()))?;

    let feature = response.features.first().ok_or_else(|| {
        log::warn!("⚠️ No results found for address: {}", address);
        DirectionsError::NotGeocodable(address.to_string())
    })?;

    match feature.center.as_slice() {
        [longitude, latitude, ..] => {
            log::debug!("📌 {} matched {:?}", address, feature.place_name);
            Ok(Coordinates { longitude: *longitude, latitude: *latitude })
        }
        _ => Err(DirectionsError::NotGeocodable(address.to_string())),
    }
}

fn parse_directions_response(body: &str) -> Result<RouteSummary, DirectionsError> {
    let response: MapboxDirectionsResponse =
        serde_json::from_str(body).map_err(|e| DirectionsError::Parse(e.to_string()))?;

    if response.code != "Ok" {
        return Err(DirectionsError::NoRoute(
            response.message.unwrap_or(response.code),
        ));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::NoRoute("empty route list".to_string()))?;

    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| RouteStep {
            instruction: step.maneuver.instruction,
            maneuver_type: step.maneuver.maneuver_type,
            distance_meters: step.distance,
            duration_seconds: step.duration,
        })
        .collect();

    let waypoints = response
        .waypoints
        .into_iter()
        .filter_map(|w| match w.location.as_slice() {
            [longitude, latitude, ..] => Some(Waypoint {
                name: w.name.clone(),
                location: Coordinates { longitude: *longitude, latitude: *latitude },
            }),
            _ => None,
        })
        .collect();

    Ok(RouteSummary {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        waypoints,
        steps,
    })
}
