//! Tunable parameters for clustering and routing.
//!
//! Every knob has a documented default constant. Configuration is
//! passed explicitly to [`Clusterer`](crate::Clusterer) and
//! [`CampusRouter`](crate::CampusRouter); there is no global state.
//! All structs deserialize from partial JSON, missing fields falling
//! back to the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HazardMapError;

/// Zoom level at or above which every hazard is shown on its own.
pub const DEFAULT_ZOOM_THRESHOLD: i32 = 17;
/// Hazards within this many meters of a cluster seed join the cluster.
pub const DEFAULT_CLUSTER_RADIUS_METERS: f64 = 50.0;
/// Cells per side of the routing grid.
pub const DEFAULT_GRID_RESOLUTION: usize = 50;
/// Cells whose center is within this distance of a building are blocked.
pub const DEFAULT_OBSTACLE_BUFFER_METERS: f64 = 25.0;
/// The boundary's bounding box grows by this share of its span per side.
pub const DEFAULT_BOUNDARY_PADDING_RATIO: f64 = 0.05;
/// How many rings outward a blocked start or goal cell may be moved.
pub const DEFAULT_MAX_SNAP_RADIUS: usize = 5;
/// Public OSRM demo server.
pub const DEFAULT_ROUTE_SERVICE_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_ROUTE_SERVICE_PROFILE: &str = "foot";
pub const DEFAULT_ROUTE_SERVICE_TIMEOUT_MS: u64 = 5000;

/// Marker clustering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// When false every hazard is its own marker at any zoom.
    pub enabled: bool,
    pub zoom_threshold: i32,
    pub radius_meters: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            enabled: true,
            zoom_threshold: DEFAULT_ZOOM_THRESHOLD,
            radius_meters: DEFAULT_CLUSTER_RADIUS_METERS,
        }
    }
}

/// Routing grid settings.
///
/// The reference values suit a campus a few hundred meters across.
/// Nothing rescales them for larger areas; raise `resolution` to keep
/// the cell size roughly constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub resolution: usize,
    pub obstacle_buffer_meters: f64,
    pub boundary_padding_ratio: f64,
    pub max_snap_radius: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            resolution: DEFAULT_GRID_RESOLUTION,
            obstacle_buffer_meters: DEFAULT_OBSTACLE_BUFFER_METERS,
            boundary_padding_ratio: DEFAULT_BOUNDARY_PADDING_RATIO,
            max_snap_radius: DEFAULT_MAX_SNAP_RADIUS,
        }
    }
}

/// External walking-route service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteServiceConfig {
    pub enabled: bool,
    pub base_url: String,
    pub profile: String,
    pub timeout_ms: u64,
}

impl RouteServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RouteServiceConfig {
    fn default() -> Self {
        RouteServiceConfig {
            enabled: true,
            base_url: DEFAULT_ROUTE_SERVICE_URL.to_string(),
            profile: DEFAULT_ROUTE_SERVICE_PROFILE.to_string(),
            timeout_ms: DEFAULT_ROUTE_SERVICE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub grid: GridConfig,
    pub service: RouteServiceConfig,
}

/// Top-level configuration for a hazard map deployment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardMapConfig {
    pub cluster: ClusterConfig,
    pub router: RouterConfig,
}

impl HazardMapConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, HazardMapError> {
        let config: HazardMapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the algorithms cannot work with.
    pub fn validate(&self) -> Result<(), HazardMapError> {
        self.cluster.validate()?;
        self.router.validate()
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), HazardMapError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HazardMapError::Config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), HazardMapError> {
        non_negative("cluster radius", self.radius_meters)
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), HazardMapError> {
        if self.resolution < 2 {
            return Err(HazardMapError::Config(format!(
                "grid resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        non_negative("obstacle buffer", self.obstacle_buffer_meters)?;
        non_negative("boundary padding", self.boundary_padding_ratio)
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), HazardMapError> {
        self.grid.validate()
    }
}
