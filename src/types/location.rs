//! Struct definitions and implementations for [`GeoPoint`].
//!
//! Hazards, buildings and evacuation points all sit somewhere on the
//! map. The [`AsLocation`] trait lets a function take any of them and
//! ask for its position, so selection and obstacle code does not care
//! which kind of object it was handed.

use serde::{Deserialize, Serialize};

use crate::error::HazardMapError;

/// A [`GeoPoint`] is a WGS84 latitude/longitude pair in degrees.
///
/// It is a plain value type with no identity. At campus scale the
/// 64-bit floats keep well under a millimeter of precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new point from a latitude and a longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Returns true if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Rejects points with NaN or infinite coordinates.
    ///
    /// # Arguments
    /// * `context` - What the point belongs to, used in the error message.
    pub fn validate(&self, context: &str) -> Result<(), HazardMapError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(HazardMapError::InvalidInput(format!(
                "{} has a non-finite position ({}, {})",
                context, self.lat, self.lng
            )))
        }
    }
}

/// Anything with a position on the campus map.
pub trait AsLocation {
    /// Returns the position of the object.
    fn position(&self) -> &GeoPoint;
}

impl AsLocation for GeoPoint {
    fn position(&self) -> &GeoPoint {
        self
    }
}
