//! Evacuation routing.
//!
//! The router picks the evacuation point nearest to the origin, then
//! walks an ordered list of [`PathStrategy`]s and keeps the first path
//! that comes back with at least two points:
//!
//! 1. A* over the campus grid, avoiding buildings.
//! 2. The external walking-route service, bounded by a timeout.
//! 3. A straight line, which always succeeds.
//!
//! Grid and service failures are logged and absorbed. The only errors
//! a caller sees are invalid input, an empty evacuation point set, and
//! cancellation it requested itself.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    algorithms::grid::CampusGrid,
    campus::{Building, CampusBoundary, CampusGeodata, EvacuationPoint},
    config::RouterConfig,
    error::HazardMapError,
    location::GeoPoint,
    route::{PathStrategy, Route},
    selection::nearest,
    service::{OsrmWalkingService, WalkingRouteService},
};

/// Default strategy order.
pub const DEFAULT_STRATEGIES: [PathStrategy; 3] = [
    PathStrategy::GridSearch,
    PathStrategy::WalkingService,
    PathStrategy::StraightLine,
];

/// Plans routes from hazards to evacuation points.
///
/// The router holds only configuration and the service handle. Every
/// call builds its own grid, so one router can serve concurrent
/// requests.
#[derive(Clone)]
pub struct CampusRouter {
    config: RouterConfig,
    service: Option<Arc<dyn WalkingRouteService>>,
    strategies: Vec<PathStrategy>,
}

impl std::fmt::Debug for CampusRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampusRouter")
            .field("config", &self.config)
            .field("has_service", &self.service.is_some())
            .field("strategies", &self.strategies)
            .finish()
    }
}

impl CampusRouter {
    /// Creates a router. When the service is enabled in `config`, an
    /// [`OsrmWalkingService`] is attached.
    ///
    /// # Errors
    /// [`HazardMapError::Config`] if the grid settings are out of range
    /// or the HTTP client cannot be built.
    pub fn new(config: RouterConfig) -> Result<CampusRouter, HazardMapError> {
        config.validate()?;
        let service: Option<Arc<dyn WalkingRouteService>> = if config.service.enabled {
            Some(Arc::new(OsrmWalkingService::new(&config.service)?))
        } else {
            None
        };
        Ok(CampusRouter {
            config,
            service,
            strategies: DEFAULT_STRATEGIES.to_vec(),
        })
    }

    /// Replaces the walking-route service.
    pub fn with_service(mut self, service: Arc<dyn WalkingRouteService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Removes the walking-route service; that strategy then always
    /// falls through.
    pub fn without_service(mut self) -> Self {
        self.service = None;
        self
    }

    /// Replaces the strategy order. A straight line is appended when
    /// missing so that routing always ends with some path.
    pub fn with_strategies(mut self, strategies: Vec<PathStrategy>) -> Self {
        self.strategies = strategies;
        if !self.strategies.contains(&PathStrategy::StraightLine) {
            self.strategies.push(PathStrategy::StraightLine);
        }
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn strategies(&self) -> &[PathStrategy] {
        &self.strategies
    }

    /// Routes from `origin` to the nearest of `evacuation_points`.
    ///
    /// # Arguments
    /// * `origin` - Usually the position of a hazard.
    /// * `evacuation_points` - Candidate destinations.
    /// * `buildings` - Obstacles for the grid search.
    /// * `boundary` - The campus outline for the grid search.
    /// * `cancel` - Fires when the caller no longer wants the result,
    ///   for instance because a newer request replaced this one.
    ///
    /// # Returns
    /// A [`Route`] whose distance is the great-circle distance to the
    /// chosen point, whichever strategy produced the path.
    ///
    /// # Errors
    /// * [`HazardMapError::InvalidInput`] on non-finite coordinates,
    ///   boundary vertices included.
    /// * [`HazardMapError::NoEvacuationPoints`] if there is nothing to
    ///   route to. No pathfinding is attempted.
    /// * [`HazardMapError::Cancelled`] if `cancel` fires first.
    pub async fn route(
        &self,
        origin: &GeoPoint,
        evacuation_points: &[EvacuationPoint],
        buildings: &[Building],
        boundary: &CampusBoundary,
        cancel: &CancellationToken,
    ) -> Result<Route, HazardMapError> {
        info!("[1/3] Validating routing request");
        origin.validate("origin")?;
        for point in evacuation_points {
            point
                .position
                .validate(&format!("evacuation point {}", point.id))?;
        }
        for building in buildings {
            building
                .position
                .validate(&format!("building {}", building.id))?;
        }
        for (i, vertex) in boundary.vertices.iter().enumerate() {
            vertex.validate(&format!("boundary vertex {}", i))?;
        }

        info!("[2/3] Selecting nearest evacuation point");
        let (destination, distance_meters) = match nearest(origin, evacuation_points) {
            Some(found) => found,
            None => {
                error!("No evacuation point configured");
                return Err(HazardMapError::NoEvacuationPoints);
            }
        };
        debug!(
            "nearest evacuation point: {} ({} m)",
            destination.name, distance_meters
        );

        info!("[3/3] Computing path to {}", destination.name);
        let target = destination.position;
        for strategy in &self.strategies {
            if cancel.is_cancelled() {
                info!("Routing request cancelled");
                return Err(HazardMapError::Cancelled);
            }
            match self
                .attempt(*strategy, origin, &target, buildings, boundary, cancel)
                .await
            {
                Ok(points) if points.len() >= 2 => {
                    info!("Route found by {:?} with {} points", strategy, points.len());
                    return Ok(Route {
                        points,
                        distance_meters,
                        destination: destination.clone(),
                        source: *strategy,
                    });
                }
                Ok(points) => {
                    warn!(
                        "{:?} returned {} points, trying next strategy",
                        strategy,
                        points.len()
                    );
                }
                Err(HazardMapError::Cancelled) => {
                    info!("Routing request cancelled");
                    return Err(HazardMapError::Cancelled);
                }
                Err(e) => {
                    warn!("{:?} failed, trying next strategy: {}", strategy, e);
                }
            }
        }

        // with_strategies keeps a straight line in the list, so this is
        // only reached for an empty strategy list built by hand
        Ok(Route {
            points: vec![*origin, target],
            distance_meters,
            destination: destination.clone(),
            source: PathStrategy::StraightLine,
        })
    }

    /// Same as [`CampusRouter::route`], taking everything from a loaded
    /// geodata snapshot.
    pub async fn route_in(
        &self,
        origin: &GeoPoint,
        geodata: &CampusGeodata,
        cancel: &CancellationToken,
    ) -> Result<Route, HazardMapError> {
        self.route(
            origin,
            &geodata.evacuation_points,
            &geodata.buildings,
            &geodata.boundary,
            cancel,
        )
        .await
    }

    async fn attempt(
        &self,
        strategy: PathStrategy,
        origin: &GeoPoint,
        destination: &GeoPoint,
        buildings: &[Building],
        boundary: &CampusBoundary,
        cancel: &CancellationToken,
    ) -> Result<Vec<GeoPoint>, HazardMapError> {
        match strategy {
            PathStrategy::GridSearch => {
                let grid = CampusGrid::build(boundary, buildings, &self.config.grid)?;
                grid.find_path(origin, destination)
            }
            PathStrategy::WalkingService => {
                self.request_walking_route(origin, destination, cancel)
                    .await
            }
            PathStrategy::StraightLine => Ok(vec![*origin, *destination]),
        }
    }

    async fn request_walking_route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        cancel: &CancellationToken,
    ) -> Result<Vec<GeoPoint>, HazardMapError> {
        let service = self.service.as_ref().ok_or_else(|| {
            HazardMapError::RouteServiceUnavailable("no route service configured".to_string())
        })?;
        let timeout = self.config.service.timeout();

        tokio::select! {
            _ = cancel.cancelled() => Err(HazardMapError::Cancelled),
            result = tokio::time::timeout(timeout, service.walking_route(origin, destination)) => {
                match result {
                    Ok(points) => points,
                    Err(_) => Err(HazardMapError::RouteServiceUnavailable(format!(
                        "no answer within {:?}",
                        timeout
                    ))),
                }
            }
        }
    }
}
