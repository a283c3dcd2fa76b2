//! Definition of the [`Cluster`] type produced by the clusterer.

use serde::Serialize;

use super::hazard::Hazard;
use super::location::GeoPoint;
use crate::polygon::BoundingBox;

/// Whether a cluster stands for one hazard or several merged ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterKind {
    Individual,
    Cluster,
}

/// A group of one or more hazards drawn as a single marker.
///
/// Clusters borrow their members from the caller's hazard slice and are
/// rebuilt on every zoom or hazard-set change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster<'a> {
    pub kind: ClusterKind,

    /// Never empty. Members keep their input order.
    pub members: Vec<&'a Hazard>,

    /// Mean member position, or the single member's own position.
    pub center: GeoPoint,
}

/// Marker size and color for a cluster of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterBadge {
    pub diameter_px: u32,
    pub color: &'static str,
}

impl<'a> Cluster<'a> {
    /// A cluster of exactly one hazard, centered on it.
    pub fn individual(hazard: &'a Hazard) -> Self {
        Cluster {
            kind: ClusterKind::Individual,
            members: vec![hazard],
            center: hazard.position,
        }
    }

    /// Builds a cluster from its members.
    ///
    /// The center is the plain arithmetic mean of member latitudes and
    /// longitudes. That is not a geodesic centroid but is close enough
    /// over a few dozen meters.
    ///
    /// Returns [`None`] if `members` is empty.
    pub fn from_members(members: Vec<&'a Hazard>) -> Option<Self> {
        match members.len() {
            0 => None,
            1 => Some(Cluster::individual(members[0])),
            n => {
                let (lat_sum, lng_sum) = members.iter().fold((0.0, 0.0), |(lat, lng), h| {
                    (lat + h.position.lat, lng + h.position.lng)
                });
                Some(Cluster {
                    kind: ClusterKind::Cluster,
                    center: GeoPoint::new(lat_sum / n as f64, lng_sum / n as f64),
                    members,
                })
            }
        }
    }

    /// Number of hazards in the cluster.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Extent of the member positions, used to zoom the map onto a
    /// cluster when it is clicked.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.members.iter().map(|h| &h.position))
            .unwrap_or_else(|| BoundingBox::around(&self.center))
    }

    /// Picks the marker badge for this cluster.
    pub fn badge(&self) -> ClusterBadge {
        match self.count() {
            n if n >= 10 => ClusterBadge {
                diameter_px: 50,
                color: "#dc3545",
            },
            n if n >= 5 => ClusterBadge {
                diameter_px: 45,
                color: "#fd7e14",
            },
            n if n >= 3 => ClusterBadge {
                diameter_px: 40,
                color: "#ffc107",
            },
            _ => ClusterBadge {
                diameter_px: 35,
                color: "#ffc107",
            },
        }
    }
}
