//! End-to-end routing and clustering over the NTUT campus snapshot.

use campus_hazard_router::{
    campus::{Building, BuildingType, EvacuationPoint},
    cluster::ClusterKind,
    data::ntut_campus,
    haversine,
    location::GeoPoint,
    route::PathStrategy,
    stats::{filter_hazards, HazardFilter, HazardStats},
    CampusRouter, Clusterer, HazardMapConfig, HazardMapError, RouteServiceConfig, RouterConfig,
};
use tokio_util::sync::CancellationToken;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn offline_router() -> CampusRouter {
    CampusRouter::new(RouterConfig {
        service: RouteServiceConfig {
            enabled: false,
            ..RouteServiceConfig::default()
        },
        ..RouterConfig::default()
    })
    .unwrap()
}

fn close_to(a: &GeoPoint, b: &GeoPoint) -> bool {
    haversine::distance(a, b) < 0.01
}

#[tokio::test]
async fn test_route_around_building_to_sports_field() {
    init_logger();
    let campus = ntut_campus();
    let origin = GeoPoint::new(25.0427, 121.5359);
    let sports_field = EvacuationPoint {
        id: 1,
        position: GeoPoint::new(25.0430, 121.5348),
        name: "Sports Field".to_string(),
        icon: String::new(),
    };

    let mut buildings = campus.buildings.clone();
    let annex = Building {
        id: 99,
        name: "Annex".to_string(),
        position: GeoPoint::new(25.04285, 121.53535),
        description: String::new(),
        building_type: BuildingType::Facility,
    };
    buildings.push(annex.clone());

    let route = offline_router()
        .route(
            &origin,
            std::slice::from_ref(&sports_field),
            &buildings,
            &campus.boundary,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(route.source, PathStrategy::GridSearch);
    assert!(route.points.len() >= 2);
    assert!(close_to(&route.points[0], &origin));
    assert!(close_to(route.points.last().unwrap(), &sports_field.position));
    assert_eq!(
        route.distance_meters,
        haversine::distance(&origin, &sports_field.position)
    );

    let interior = &route.points[1..route.points.len() - 1];
    for point in interior {
        assert!(haversine::distance(point, &annex.position) > 25.0);
    }
}

#[tokio::test]
async fn test_route_in_picks_nearest_evacuation_point() {
    init_logger();
    let campus = ntut_campus();
    let origin = campus.hazards[0].position;

    let route = offline_router()
        .route_in(&origin, &campus, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(route.destination.name, "Sports Field");
    assert_eq!(route.points.first(), Some(&origin));
    assert_eq!(route.points.last(), Some(&route.destination.position));
}

#[tokio::test]
async fn test_route_in_without_evacuation_points() {
    let mut campus = ntut_campus();
    campus.evacuation_points.clear();

    let result = offline_router()
        .route_in(&campus.hazards[0].position, &campus, &CancellationToken::new())
        .await;
    assert_eq!(result, Err(HazardMapError::NoEvacuationPoints));
}

#[test]
fn test_clustering_follows_zoom() {
    let config = HazardMapConfig::default();
    let campus = ntut_campus();
    let clusterer = Clusterer::new(config.cluster.clone()).unwrap();

    let zoomed_in = clusterer.cluster(&campus.hazards, 18).unwrap();
    assert!(zoomed_in.iter().all(|c| c.kind == ClusterKind::Individual));
    assert_eq!(zoomed_in.len(), campus.hazards.len());

    let zoomed_out = clusterer.cluster(&campus.hazards, 15).unwrap();
    assert!(zoomed_out.len() < campus.hazards.len());
    let total: usize = zoomed_out.iter().map(|c| c.count()).sum();
    assert_eq!(total, campus.hazards.len());
}

#[test]
fn test_filtered_hazards_cluster_independently() {
    let campus = ntut_campus();
    let chemical: Vec<_> = filter_hazards(
        &campus.hazards,
        HazardFilter::Only(campus_hazard_router::hazard::HazardType::Chemical),
    )
    .into_iter()
    .cloned()
    .collect();

    let stats = HazardStats::from_hazards(&chemical);
    assert_eq!(stats.total, 2);

    let clusters = Clusterer::default().cluster(&chemical, 16).unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].kind, ClusterKind::Cluster);
}
