//! Grid-constrained A* over the campus.
//!
//! A fixed grid is laid over the padded bounding box of the campus
//! boundary. A cell is blocked when its center lies outside the
//! boundary or within the obstacle buffer of any building. Open cells
//! become nodes of an undirected graph, joined to their eight
//! neighbors by edges weighted with the haversine distance between
//! cell centers. The search itself is petgraph's A* with the haversine
//! distance to the goal as heuristic, which never overestimates.
//!
//! Every [`CampusGrid`] is built for one routing request and owns all
//! of its state, so concurrent requests never share a grid.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use petgraph::{
    algo::astar,
    graph::{NodeIndex, UnGraph},
};

use crate::{
    campus::{Building, CampusBoundary},
    config::GridConfig,
    error::HazardMapError,
    haversine,
    location::GeoPoint,
    polygon::{contains_point, BoundingBox},
};

/// A grid cell. Rows run south to north, columns west to east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

/// Neighbor offsets that cover each undirected edge exactly once.
const FORWARD_NEIGHBORS: [(isize, isize); 4] = [(0, 1), (1, -1), (1, 0), (1, 1)];

/// The campus rasterized into open and blocked cells, plus the graph of
/// open cells used for the search.
#[derive(Debug)]
pub struct CampusGrid {
    bbox: BoundingBox,
    rows: usize,
    cols: usize,
    lat_step: f64,
    lng_step: f64,
    blocked: Vec<bool>,
    graph: UnGraph<GridCell, OrderedFloat<f64>>,
    node_indices: HashMap<GridCell, NodeIndex>,
    max_snap_radius: usize,
}

impl CampusGrid {
    /// Rasterizes the campus and builds the search graph.
    ///
    /// # Arguments
    /// * `boundary` - The campus outline. Cells outside it are blocked.
    /// * `buildings` - Obstacles. Cells within the buffer are blocked.
    /// * `config` - Grid resolution, buffer, padding and snap radius.
    ///
    /// # Errors
    /// [`HazardMapError::GridSearchFailed`] if the boundary has fewer
    /// than three vertices or no area, or the resolution is zero.
    ///
    /// # Time Complexity
    /// *O*(*r^2 (v + b)*) for resolution *r*, *v* boundary vertices and
    /// *b* buildings.
    pub fn build(
        boundary: &CampusBoundary,
        buildings: &[Building],
        config: &GridConfig,
    ) -> Result<CampusGrid, HazardMapError> {
        let polygon = &boundary.vertices;
        if polygon.len() < 3 {
            return Err(HazardMapError::GridSearchFailed(format!(
                "campus boundary has {} vertices, need at least 3",
                polygon.len()
            )));
        }
        if config.resolution == 0 {
            return Err(HazardMapError::GridSearchFailed(
                "grid resolution is zero".to_string(),
            ));
        }

        let bbox = BoundingBox::from_points(polygon.iter())
            .ok_or_else(|| HazardMapError::GridSearchFailed("empty boundary".to_string()))?
            .expanded(config.boundary_padding_ratio);
        if bbox.lat_span() <= 0.0 || bbox.lng_span() <= 0.0 {
            return Err(HazardMapError::GridSearchFailed(
                "campus boundary has no area".to_string(),
            ));
        }

        let rows = config.resolution;
        let cols = config.resolution;
        let mut grid = CampusGrid {
            bbox,
            rows,
            cols,
            lat_step: bbox.lat_span() / rows as f64,
            lng_step: bbox.lng_span() / cols as f64,
            blocked: vec![false; rows * cols],
            graph: UnGraph::default(),
            node_indices: HashMap::new(),
            max_snap_radius: config.max_snap_radius,
        };

        for row in 0..rows {
            for col in 0..cols {
                let cell = GridCell { row, col };
                let center = grid.center_of(cell);
                let is_blocked = !contains_point(polygon, &center)
                    || buildings.iter().any(|b| {
                        haversine::distance(&center, &b.position) <= config.obstacle_buffer_meters
                    });
                grid.blocked[row * cols + col] = is_blocked;
                if !is_blocked {
                    let index = grid.graph.add_node(cell);
                    grid.node_indices.insert(cell, index);
                }
            }
        }

        for row in 0..rows {
            for col in 0..cols {
                let from = GridCell { row, col };
                let from_index = match grid.node_indices.get(&from) {
                    Some(index) => *index,
                    None => continue,
                };
                for (dr, dc) in FORWARD_NEIGHBORS {
                    let to = match grid.offset(from, dr, dc) {
                        Some(cell) => cell,
                        None => continue,
                    };
                    if let Some(to_index) = grid.node_indices.get(&to) {
                        let cost = haversine::distance(&grid.center_of(from), &grid.center_of(to));
                        grid.graph.add_edge(from_index, *to_index, OrderedFloat(cost));
                    }
                }
            }
        }

        debug!(
            "campus grid {}x{}: {} open cells, {} edges",
            rows,
            cols,
            grid.graph.node_count(),
            grid.graph.edge_count()
        );
        Ok(grid)
    }

    /// Returns (rows, cols).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells a path may pass through.
    pub fn open_cell_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether a cell is blocked. Cells off the grid count as blocked.
    pub fn is_blocked(&self, cell: GridCell) -> bool {
        if cell.row >= self.rows || cell.col >= self.cols {
            return true;
        }
        self.blocked[cell.row * self.cols + cell.col]
    }

    /// The geographic center of a cell.
    pub fn center_of(&self, cell: GridCell) -> GeoPoint {
        GeoPoint::new(
            self.bbox.min_lat + (cell.row as f64 + 0.5) * self.lat_step,
            self.bbox.min_lng + (cell.col as f64 + 0.5) * self.lng_step,
        )
    }

    /// The cell containing `point`. Points off the grid map to the
    /// nearest edge cell.
    pub fn cell_of(&self, point: &GeoPoint) -> GridCell {
        let to_index = |offset: f64, step: f64, len: usize| -> usize {
            let i = (offset / step).floor();
            if i <= 0.0 {
                0
            } else {
                (i as usize).min(len - 1)
            }
        };
        GridCell {
            row: to_index(point.lat - self.bbox.min_lat, self.lat_step, self.rows),
            col: to_index(point.lng - self.bbox.min_lng, self.lng_step, self.cols),
        }
    }

    /// Finds the open cell nearest to `point`, starting at `cell` and
    /// searching outward in square rings up to the snap radius.
    ///
    /// Within a ring the cell whose center is closest to `point` wins;
    /// ties go to the first cell in row-major scan order.
    pub fn snap_to_open(&self, cell: GridCell, point: &GeoPoint) -> Option<GridCell> {
        if !self.is_blocked(cell) {
            return Some(cell);
        }

        for radius in 1..=self.max_snap_radius as isize {
            let mut best: Option<(GridCell, f64)> = None;
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    if dr.abs() != radius && dc.abs() != radius {
                        continue;
                    }
                    let candidate = match self.offset(cell, dr, dc) {
                        Some(c) if !self.is_blocked(c) => c,
                        _ => continue,
                    };
                    let d = haversine::distance(&self.center_of(candidate), point);
                    if best.map_or(true, |(_, best_d)| d < best_d) {
                        best = Some((candidate, d));
                    }
                }
            }
            if let Some((found, _)) = best {
                debug!("snapped {:?} to {:?} at ring {}", cell, found, radius);
                return Some(found);
            }
        }
        None
    }

    /// Plans a path from `origin` to `destination` through open cells.
    ///
    /// The raw cell path is thinned to every second cell center (always
    /// keeping the last one), then the exact origin is put in front and
    /// the exact destination at the end.
    ///
    /// # Errors
    /// [`HazardMapError::GridSearchFailed`] if no open cell lies within
    /// the snap radius of either end, or the two ends are not connected.
    pub fn find_path(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, HazardMapError> {
        let start = self
            .snap_to_open(self.cell_of(origin), origin)
            .ok_or_else(|| {
                HazardMapError::GridSearchFailed("no open cell near the origin".to_string())
            })?;
        let goal = self
            .snap_to_open(self.cell_of(destination), destination)
            .ok_or_else(|| {
                HazardMapError::GridSearchFailed("no open cell near the destination".to_string())
            })?;
        debug!("grid search from {:?} to {:?}", start, goal);

        let (start_index, goal_index) =
            match (self.node_indices.get(&start), self.node_indices.get(&goal)) {
                (Some(s), Some(g)) => (*s, *g),
                _ => {
                    return Err(HazardMapError::GridSearchFailed(
                        "snapped cell missing from the search graph".to_string(),
                    ))
                }
            };

        let goal_center = self.center_of(goal);
        let (cost, path) = astar(
            &self.graph,
            start_index,
            |finish| finish == goal_index,
            |e| (*e.weight()).into_inner(),
            |n| haversine::distance(&self.center_of(self.graph[n]), &goal_center),
        )
        .ok_or_else(|| {
            HazardMapError::GridSearchFailed(format!("no path from {:?} to {:?}", start, goal))
        })?;
        debug!("grid path of {} cells, {} m", path.len(), cost);

        let centers: Vec<GeoPoint> = path
            .iter()
            .map(|index| self.center_of(self.graph[*index]))
            .collect();

        let mut points = Vec::with_capacity(centers.len() / 2 + 3);
        points.push(*origin);
        points.extend(thin_path(&centers));
        points.push(*destination);
        points.dedup();
        Ok(points)
    }

    fn offset(&self, cell: GridCell, dr: isize, dc: isize) -> Option<GridCell> {
        let row = cell.row as isize + dr;
        let col = cell.col as isize + dc;
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            return None;
        }
        Some(GridCell {
            row: row as usize,
            col: col as usize,
        })
    }
}

/// Keeps every second point, plus the last point if the stride skipped
/// it.
pub fn thin_path(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut thinned: Vec<GeoPoint> = points.iter().step_by(2).copied().collect();
    if points.len() > 1 && (points.len() - 1) % 2 != 0 {
        thinned.push(points[points.len() - 1]);
    }
    thinned
}
