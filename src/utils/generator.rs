//! Deterministic generators for synthetic hazard sets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hazard::{Hazard, HazardLevel, HazardType};
use crate::haversine::EARTH_RADIUS_METERS;
use crate::location::GeoPoint;

/// Generates `count` hazards scattered uniformly over a disk of
/// `radius_meters` around `center`.
///
/// The same `seed` always yields the same hazards. Ids run from 1.
pub fn generate_hazards_near(
    center: &GeoPoint,
    radius_meters: f64,
    count: usize,
    seed: u64,
) -> Vec<Hazard> {
    let mut rng = StdRng::seed_from_u64(seed);
    let meters_per_degree_lat = EARTH_RADIUS_METERS.to_radians();
    let meters_per_degree_lng = meters_per_degree_lat * center.lat.to_radians().cos();

    (0..count)
        .map(|i| {
            // sqrt keeps the density uniform over the disk
            let r = radius_meters * rng.gen::<f64>().sqrt();
            let theta = rng.gen_range(0.0..std::f64::consts::TAU);
            let position = GeoPoint::new(
                center.lat + r * theta.sin() / meters_per_degree_lat,
                center.lng + r * theta.cos() / meters_per_degree_lng,
            );
            let id = i as u32 + 1;
            Hazard {
                id,
                name: format!("Generated hazard {}", id),
                hazard_type: HazardType::ALL[rng.gen_range(0..HazardType::ALL.len())],
                level: HazardLevel::ALL[rng.gen_range(0..HazardLevel::ALL.len())],
                position,
                building: None,
                description: None,
            }
        })
        .collect()
}
