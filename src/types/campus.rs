//! Campus geodata: buildings, the campus boundary and evacuation points.
//!
//! The geodata provider hands these over as an already-loaded,
//! read-only snapshot. [`CampusGeodata`] bundles one such snapshot and
//! can be read from JSON.

use serde::{Deserialize, Serialize};

use super::error::HazardMapError;
use super::hazard::Hazard;
use super::location::{AsLocation, GeoPoint};

/// Buildings are either teaching space or service facilities. The type
/// is descriptive only; every building is an obstacle for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    Academic,
    Facility,
}

/// A campus building. Only its reference position matters to the
/// router, which keeps a buffer around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub name: String,
    pub position: GeoPoint,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub building_type: BuildingType,
}

impl AsLocation for Building {
    fn position(&self) -> &GeoPoint {
        &self.position
    }
}

/// Display style of the boundary outline. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        BoundaryStyle {
            color: "#0066cc".to_string(),
            weight: 2.0,
            fill_color: "#0066cc".to_string(),
            fill_opacity: 0.1,
        }
    }
}

/// The campus outline as a simple polygon.
///
/// The closing edge from the last vertex back to the first is implied.
/// All routable space lies inside the polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusBoundary {
    #[serde(default)]
    pub name: String,
    pub vertices: Vec<GeoPoint>,
    #[serde(default)]
    pub style: BoundaryStyle,
}

impl CampusBoundary {
    /// Creates an unnamed boundary with the default style.
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        CampusBoundary {
            name: String::new(),
            vertices,
            style: BoundaryStyle::default(),
        }
    }
}

/// A designated safe-assembly location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationPoint {
    pub id: u32,
    pub position: GeoPoint,
    pub name: String,
    /// Reference to the marker icon asset, resolved by the renderer.
    #[serde(default)]
    pub icon: String,
}

impl AsLocation for EvacuationPoint {
    fn position(&self) -> &GeoPoint {
        &self.position
    }
}

/// One loaded snapshot of everything the map knows about a campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusGeodata {
    pub boundary: CampusBoundary,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub evacuation_points: Vec<EvacuationPoint>,
    #[serde(default)]
    pub hazards: Vec<Hazard>,
}

impl CampusGeodata {
    /// Parses a snapshot from JSON and validates its coordinates.
    pub fn from_json_str(json: &str) -> Result<Self, HazardMapError> {
        let geodata: CampusGeodata = serde_json::from_str(json)?;
        geodata.validate()?;
        Ok(geodata)
    }

    /// Checks that every coordinate in the snapshot is finite.
    pub fn validate(&self) -> Result<(), HazardMapError> {
        for (i, vertex) in self.boundary.vertices.iter().enumerate() {
            vertex.validate(&format!("boundary vertex {}", i))?;
        }
        for building in &self.buildings {
            building
                .position
                .validate(&format!("building {}", building.id))?;
        }
        for point in &self.evacuation_points {
            point
                .position
                .validate(&format!("evacuation point {}", point.id))?;
        }
        for hazard in &self.hazards {
            hazard.position.validate(&format!("hazard {}", hazard.id))?;
        }
        Ok(())
    }
}
