//! Campus Hazard Routing Library.
//! Clusters hazard markers for display and routes people from a hazard
//! to the nearest evacuation point.

#[macro_use]
extern crate log;

pub mod types {
    pub mod campus;
    pub mod cluster;
    pub mod error;
    pub mod hazard;
    pub mod location;
    pub mod route;
}

pub mod utils {
    pub mod generator;
    pub mod haversine;
    pub mod polygon;
    pub mod selection;
    pub mod stats;
}

pub mod algorithms {
    pub mod cluster;
    pub mod grid;
}

pub mod config;
pub mod data;
pub mod router;
pub mod service;

pub use types::*;
pub use utils::*;

pub use algorithms::cluster::Clusterer;
pub use algorithms::grid::CampusGrid;
pub use config::{ClusterConfig, GridConfig, HazardMapConfig, RouteServiceConfig, RouterConfig};
pub use router::CampusRouter;
pub use service::{OsrmWalkingService, WalkingRouteService};
pub use types::error::HazardMapError;
