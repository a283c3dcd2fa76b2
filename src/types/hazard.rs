//! Definitions for [`Hazard`] and its classification enums.

use serde::{Deserialize, Serialize};

use super::location::{AsLocation, GeoPoint};

/// What kind of danger a hazard zone poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Chemical,
    Mechanical,
    Electrical,
    Storage,
}

impl HazardType {
    /// All hazard types in display order.
    pub const ALL: [HazardType; 4] = [
        HazardType::Chemical,
        HazardType::Mechanical,
        HazardType::Electrical,
        HazardType::Storage,
    ];
}

/// Severity of a hazard zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardLevel {
    High,
    Medium,
    Low,
}

impl HazardLevel {
    /// All levels, most severe first.
    pub const ALL: [HazardLevel; 3] = [HazardLevel::High, HazardLevel::Medium, HazardLevel::Low];

    /// Radius of the alert ring drawn around a hazard of this level.
    pub fn radar_radius_meters(&self) -> f64 {
        match self {
            HazardLevel::High => 50.0,
            HazardLevel::Medium => 35.0,
            HazardLevel::Low => 30.0,
        }
    }
}

/// A hazard zone on campus.
///
/// Hazards are immutable snapshots handed in by the geodata provider.
/// Nothing in this crate mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    pub level: HazardLevel,
    pub position: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AsLocation for Hazard {
    fn position(&self) -> &GeoPoint {
        &self.position
    }
}
