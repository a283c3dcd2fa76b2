//! Definition of the [`Route`] type returned by the router.

use serde::{Deserialize, Serialize};

use super::campus::EvacuationPoint;
use super::location::GeoPoint;

/// Ways of producing a walking path, in the order the router tries
/// them by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// A* over a grid laid on the campus, avoiding buildings.
    GridSearch,
    /// The external walking-route service.
    WalkingService,
    /// Origin to destination in one segment. Always succeeds.
    StraightLine,
}

/// A walkable path from a hazard to an evacuation point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// At least two points, origin first and destination last.
    pub points: Vec<GeoPoint>,

    /// Great-circle distance from origin to the evacuation point. This
    /// is a display figure, not the length of `points`.
    pub distance_meters: f64,

    /// The evacuation point the route leads to.
    pub destination: EvacuationPoint,

    /// Which strategy produced `points`.
    pub source: PathStrategy,
}

impl Route {
    /// Length of the polyline itself, summed segment by segment.
    pub fn path_length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| crate::haversine::distance(&w[0], &w[1]))
            .sum()
    }
}

#[cfg(test)]
mod route_tests {
    use super::*;

    #[test]
    fn test_path_length_of_detour_exceeds_distance() {
        let origin = GeoPoint::new(25.0420, 121.5310);
        let corner = GeoPoint::new(25.0430, 121.5330);
        let end = GeoPoint::new(25.0420, 121.5350);
        let route = Route {
            points: vec![origin, corner, end],
            distance_meters: crate::haversine::distance(&origin, &end),
            destination: EvacuationPoint {
                id: 1,
                position: end,
                name: "Field".to_string(),
                icon: String::new(),
            },
            source: PathStrategy::GridSearch,
        };
        assert!(route.path_length_meters() > route.distance_meters);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(
            serde_json::to_string(&PathStrategy::WalkingService).unwrap(),
            "\"walking_service\""
        );
    }
}
