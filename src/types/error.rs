//! Error type shared by the clusterer, the grid search and the router.
//!
//! Only [`HazardMapError::InvalidInput`] and
//! [`HazardMapError::NoEvacuationPoints`] ever leave
//! [`CampusRouter::route`](crate::router::CampusRouter::route) for a
//! request that was not cancelled. Grid and service failures are
//! absorbed by the fallback chain.

use thiserror::Error;

/// Errors raised by the hazard map core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HazardMapError {
    /// Malformed input such as a non-finite coordinate.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The router was given no evacuation point to choose from.
    #[error("no evacuation point configured")]
    NoEvacuationPoints,

    /// No path through the campus grid between start and goal.
    #[error("grid search failed: {0}")]
    GridSearchFailed(String),

    /// The external walking-route service did not produce a route.
    #[error("route service unavailable: {0}")]
    RouteServiceUnavailable(String),

    /// The caller cancelled the routing request.
    #[error("routing request cancelled")]
    Cancelled,

    /// Configuration or geodata could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HazardMapError {
    /// Returns true for failures the router recovers from by trying
    /// the next path strategy.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HazardMapError::GridSearchFailed(_) | HazardMapError::RouteServiceUnavailable(_)
        )
    }
}

impl From<serde_json::Error> for HazardMapError {
    fn from(err: serde_json::Error) -> Self {
        HazardMapError::Config(err.to_string())
    }
}
