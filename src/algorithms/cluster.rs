//! Zoom-dependent grouping of hazard markers.
//!
//! At low zoom levels nearby hazards are merged into one marker. The
//! grouping is a single greedy pass: each hazard not yet taken seeds a
//! cluster and pulls in every other free hazard within the radius of
//! the seed. Distances are measured to the seed, not to the moving
//! centroid, so the outcome depends on input order. Given A near B and
//! B near C but A far from C, the order decides whether B joins A or C.

use crate::{
    cluster::Cluster, config::ClusterConfig, error::HazardMapError, hazard::Hazard, haversine,
};

/// Groups hazards into clusters according to a [`ClusterConfig`].
#[derive(Debug, Clone, Default)]
pub struct Clusterer {
    config: ClusterConfig,
}

impl Clusterer {
    /// # Errors
    /// [`HazardMapError::Config`] if the radius is negative or not a
    /// number.
    pub fn new(config: ClusterConfig) -> Result<Self, HazardMapError> {
        config.validate()?;
        Ok(Clusterer { config })
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Clusters `hazards` for the given zoom level using the configured
    /// radius. See [`Clusterer::cluster_with_radius`].
    pub fn cluster<'a>(
        &self,
        hazards: &'a [Hazard],
        zoom_level: i32,
    ) -> Result<Vec<Cluster<'a>>, HazardMapError> {
        self.cluster_with_radius(hazards, zoom_level, self.config.radius_meters)
    }

    /// Clusters `hazards` for the given zoom level.
    ///
    /// With clustering disabled, or at or above the zoom threshold,
    /// every hazard becomes its own individual cluster and no distance
    /// is computed.
    ///
    /// Output clusters follow the order in which their seeds appear in
    /// `hazards`, and members keep input order.
    ///
    /// # Arguments
    /// * `hazards` - The hazards currently shown.
    /// * `zoom_level` - The map's integer zoom level.
    /// * `radius_meters` - Maximum seed-to-member distance.
    ///
    /// # Errors
    /// [`HazardMapError::InvalidInput`] if any hazard has a non-finite
    /// position or `radius_meters` is negative or not a number. Empty
    /// input gives empty output.
    ///
    /// # Time Complexity
    /// *O*(*n^2*) distance computations at worst.
    pub fn cluster_with_radius<'a>(
        &self,
        hazards: &'a [Hazard],
        zoom_level: i32,
        radius_meters: f64,
    ) -> Result<Vec<Cluster<'a>>, HazardMapError> {
        if !(radius_meters.is_finite() && radius_meters >= 0.0) {
            return Err(HazardMapError::InvalidInput(format!(
                "cluster radius must be a non-negative number, got {}",
                radius_meters
            )));
        }
        for hazard in hazards {
            hazard.position.validate(&format!("hazard {}", hazard.id))?;
        }

        if !self.config.enabled || zoom_level >= self.config.zoom_threshold {
            return Ok(hazards.iter().map(Cluster::individual).collect());
        }

        let mut assigned = vec![false; hazards.len()];
        let mut clusters = Vec::new();

        for (i, seed) in hazards.iter().enumerate() {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;

            let mut members = vec![seed];
            for (j, other) in hazards.iter().enumerate().skip(i + 1) {
                if assigned[j] {
                    continue;
                }
                if haversine::distance(&seed.position, &other.position) <= radius_meters {
                    members.push(other);
                    assigned[j] = true;
                }
            }

            if let Some(cluster) = Cluster::from_members(members) {
                clusters.push(cluster);
            }
        }

        debug!(
            "zoom {}: {} hazards into {} clusters",
            zoom_level,
            hazards.len(),
            clusters.len()
        );
        Ok(clusters)
    }
}

#[cfg(test)]
mod cluster_tests {
    use super::*;
    use crate::{
        cluster::ClusterKind,
        data::ntut_campus,
        generator::generate_hazards_near,
        hazard::{HazardLevel, HazardType},
        location::GeoPoint,
    };
    use rstest::rstest;

    fn hazard(id: u32, lat: f64, lng: f64) -> Hazard {
        Hazard {
            id,
            name: format!("hazard {}", id),
            hazard_type: HazardType::Electrical,
            level: HazardLevel::Medium,
            position: GeoPoint::new(lat, lng),
            building: None,
            description: None,
        }
    }

    fn ids(cluster: &Cluster) -> Vec<u32> {
        cluster.members.iter().map(|h| h.id).collect()
    }

    #[rstest]
    #[case(17)]
    #[case(18)]
    #[case(19)]
    fn test_high_zoom_shows_individual_markers(#[case] zoom: i32) {
        let hazards = ntut_campus().hazards;
        let clusters = Clusterer::default().cluster(&hazards, zoom).unwrap();

        assert_eq!(clusters.len(), hazards.len());
        for (cluster, hazard) in clusters.iter().zip(&hazards) {
            assert_eq!(cluster.kind, ClusterKind::Individual);
            assert_eq!(cluster.count(), 1);
            assert_eq!(cluster.center, hazard.position);
            assert_eq!(cluster.members[0].id, hazard.id);
        }
    }

    #[test]
    fn test_disabled_matches_high_zoom() {
        let hazards = ntut_campus().hazards;
        let disabled = Clusterer::new(ClusterConfig {
            enabled: false,
            ..ClusterConfig::default()
        })
        .unwrap();
        let at_low_zoom = disabled.cluster(&hazards, 10).unwrap();
        let at_high_zoom = Clusterer::default().cluster(&hazards, 18).unwrap();
        assert_eq!(at_low_zoom, at_high_zoom);
    }

    /// On the NTUT data the two chemical labs share a building and the
    /// two north hazards are 30 m apart.
    #[test]
    fn test_low_zoom_merges_close_hazards() {
        let hazards = ntut_campus().hazards;
        let clusters = Clusterer::default().cluster(&hazards, 16).unwrap();

        let groups: Vec<Vec<u32>> = clusters.iter().map(ids).collect();
        assert_eq!(groups, vec![vec![1, 5], vec![2, 4], vec![3]]);
        assert_eq!(clusters[0].kind, ClusterKind::Cluster);
        assert_eq!(clusters[2].kind, ClusterKind::Individual);
    }

    #[test]
    fn test_cluster_center_is_member_mean() {
        let hazards = generate_hazards_near(&GeoPoint::new(25.0431, 121.5347), 150.0, 40, 11);
        let clusters = Clusterer::default().cluster(&hazards, 15).unwrap();

        let total: usize = clusters.iter().map(|c| c.count()).sum();
        assert_eq!(total, hazards.len());
        for cluster in &clusters {
            assert_eq!(cluster.count(), cluster.members.len());
            let n = cluster.count() as f64;
            let lat = cluster.members.iter().map(|h| h.position.lat).sum::<f64>() / n;
            let lng = cluster.members.iter().map(|h| h.position.lng).sum::<f64>() / n;
            assert!((cluster.center.lat - lat).abs() < 1e-12);
            assert!((cluster.center.lng - lng).abs() < 1e-12);
        }
    }

    #[test]
    fn test_members_are_within_radius_of_seed() {
        let hazards = generate_hazards_near(&GeoPoint::new(25.0431, 121.5347), 200.0, 60, 3);
        let clusters = Clusterer::default().cluster(&hazards, 14).unwrap();
        for cluster in &clusters {
            let seed = cluster.members[0];
            for member in &cluster.members {
                assert!(haversine::distance(&seed.position, &member.position) <= 50.0);
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let hazards = generate_hazards_near(&GeoPoint::new(25.0431, 121.5347), 120.0, 30, 99);
        let clusterer = Clusterer::default();
        let first = clusterer.cluster(&hazards, 15).unwrap();
        let second = clusterer.cluster(&hazards, 15).unwrap();
        assert_eq!(first, second);
    }

    /// A-B and B-C are 40 m apart, A-C 80 m. Whoever comes first keeps B.
    #[test]
    fn test_grouping_depends_on_seed_order() {
        let meters_to_lng = |m: f64| m / 100_900.0;
        let a = hazard(1, 25.0430, 121.5340);
        let b = hazard(2, 25.0430, 121.5340 + meters_to_lng(40.0));
        let c = hazard(3, 25.0430, 121.5340 + meters_to_lng(80.0));

        let clusterer = Clusterer::default();

        let abc = vec![a.clone(), b.clone(), c.clone()];
        let groups: Vec<Vec<u32>> = clusterer.cluster(&abc, 15).unwrap().iter().map(ids).collect();
        assert_eq!(groups, vec![vec![1, 2], vec![3]]);

        let cba = vec![c, b, a];
        let groups: Vec<Vec<u32>> = clusterer.cluster(&cba, 15).unwrap().iter().map(ids).collect();
        assert_eq!(groups, vec![vec![3, 2], vec![1]]);
    }

    #[test]
    fn test_explicit_radius_overrides_config() {
        let hazards = ntut_campus().hazards;
        let clusters = Clusterer::default()
            .cluster_with_radius(&hazards, 16, 1.0)
            .unwrap();
        let groups: Vec<Vec<u32>> = clusters.iter().map(ids).collect();
        assert_eq!(groups, vec![vec![1], vec![2], vec![3], vec![4], vec![5]]);
    }

    #[test]
    fn test_bad_radius_rejected() {
        let config = ClusterConfig {
            radius_meters: f64::NAN,
            ..ClusterConfig::default()
        };
        assert!(matches!(
            Clusterer::new(config),
            Err(HazardMapError::Config(_))
        ));

        let hazards = ntut_campus().hazards;
        assert!(matches!(
            Clusterer::default().cluster_with_radius(&hazards, 16, -5.0),
            Err(HazardMapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let clusters = Clusterer::default().cluster(&[], 12).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let hazards = vec![hazard(1, 25.0, 121.0), hazard(2, f64::NAN, 121.0)];
        assert!(matches!(
            Clusterer::default().cluster(&hazards, 12),
            Err(HazardMapError::InvalidInput(_))
        ));
        assert!(matches!(
            Clusterer::default().cluster(&hazards, 18),
            Err(HazardMapError::InvalidInput(_))
        ));
    }
}
