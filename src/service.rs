//! Client for the external walking-route service.
//!
//! The router falls back to this service when the grid search fails.
//! [`WalkingRouteService`] is the seam: production code uses
//! [`OsrmWalkingService`], tests plug in their own implementations.
//! Every failure maps to [`HazardMapError::RouteServiceUnavailable`]
//! so the router can move on to the next strategy.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{config::RouteServiceConfig, error::HazardMapError, location::GeoPoint};

/// Anything that can plan a walking route between two points.
#[async_trait]
pub trait WalkingRouteService: Send + Sync {
    /// Returns the route geometry from `origin` to `destination`, at
    /// least two points long.
    async fn walking_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, HazardMapError>;
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

/// Extracts the route geometry from an OSRM route response body.
///
/// Coordinates come as `[lng, lat]` pairs. The response must have
/// `code == "Ok"` and a first route of at least two finite points.
pub fn parse_walking_geometry(body: &str) -> Result<Vec<GeoPoint>, HazardMapError> {
    let response: OsrmResponse = serde_json::from_str(body).map_err(|e| {
        HazardMapError::RouteServiceUnavailable(format!("malformed response: {}", e))
    })?;
    response.into_geometry()
}

impl OsrmResponse {
    fn into_geometry(self) -> Result<Vec<GeoPoint>, HazardMapError> {
        if self.code != "Ok" {
            return Err(HazardMapError::RouteServiceUnavailable(format!(
                "service answered with code {:?}",
                self.code
            )));
        }

        let route = self.routes.into_iter().next().ok_or_else(|| {
            HazardMapError::RouteServiceUnavailable("response contains no route".to_string())
        })?;

        let points: Vec<GeoPoint> = route
            .geometry
            .coordinates
            .iter()
            .map(|[lng, lat]| GeoPoint::new(*lat, *lng))
            .collect();

        if points.len() < 2 {
            return Err(HazardMapError::RouteServiceUnavailable(format!(
                "route geometry has {} points",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(HazardMapError::RouteServiceUnavailable(
                "route geometry has non-finite coordinates".to_string(),
            ));
        }
        Ok(points)
    }
}

/// Walking routes from an OSRM-compatible HTTP server.
#[derive(Debug, Clone)]
pub struct OsrmWalkingService {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmWalkingService {
    /// Creates a client with the configured server, profile and
    /// per-request timeout.
    pub fn new(config: &RouteServiceConfig) -> Result<Self, HazardMapError> {
        let client = Client::builder()
            .user_agent(concat!("campus-hazard-router/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| HazardMapError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(OsrmWalkingService {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile.clone(),
        })
    }

    /// The request URL for a route between two points.
    pub fn route_url(&self, origin: &GeoPoint, destination: &GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, origin.lng, origin.lat, destination.lng, destination.lat
        )
    }
}

#[async_trait]
impl WalkingRouteService for OsrmWalkingService {
    async fn walking_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, HazardMapError> {
        let url = self.route_url(origin, destination);
        debug!("requesting walking route: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HazardMapError::RouteServiceUnavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HazardMapError::RouteServiceUnavailable(format!(
                "service answered {}",
                status
            )));
        }

        let body: OsrmResponse = response.json().await.map_err(|e| {
            HazardMapError::RouteServiceUnavailable(format!("malformed response: {}", e))
        })?;
        body.into_geometry()
    }
}
