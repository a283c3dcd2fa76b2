//! Reference geodata for the National Taipei University of Technology
//! campus, used by demos and tests.

use crate::campus::{
    BoundaryStyle, Building, BuildingType, CampusBoundary, CampusGeodata, EvacuationPoint,
};
use crate::hazard::{Hazard, HazardLevel, HazardType};
use crate::location::GeoPoint;

/// Initial map view center.
pub const NTUT_MAP_CENTER: GeoPoint = GeoPoint::new(25.04313415950537, 121.53473568046063);

const NTUT_BOUNDARY: [(f64, f64); 9] = [
    (25.044223948760656, 121.53305473189329),
    (25.04421239190933, 121.53364255696714),
    (25.044432768248747, 121.53402403595993),
    (25.044066456681207, 121.53479774584649),
    (25.043976009208126, 121.53535182197972),
    (25.043691099244462, 121.53627029049017),
    (25.041931878605887, 121.53662469954945),
    (25.04246130375998, 121.53309526389347),
    (25.043308549266193, 121.53305460482366),
];

fn building(id: u32, name: &str, lat: f64, lng: f64, building_type: BuildingType) -> Building {
    Building {
        id,
        name: name.to_string(),
        position: GeoPoint::new(lat, lng),
        description: name.to_string(),
        building_type,
    }
}

fn hazard(
    id: u32,
    name: &str,
    hazard_type: HazardType,
    level: HazardLevel,
    lat: f64,
    lng: f64,
    building: &str,
) -> Hazard {
    Hazard {
        id,
        name: name.to_string(),
        hazard_type,
        level,
        position: GeoPoint::new(lat, lng),
        building: Some(building.to_string()),
        description: Some(name.to_string()),
    }
}

fn evacuation_point(id: u32, name: &str, lat: f64, lng: f64) -> EvacuationPoint {
    EvacuationPoint {
        id,
        position: GeoPoint::new(lat, lng),
        name: name.to_string(),
        icon: "/icons/evacuation.png".to_string(),
    }
}

/// The full NTUT snapshot: boundary, four buildings, five hazards and
/// three evacuation points.
pub fn ntut_campus() -> CampusGeodata {
    CampusGeodata {
        boundary: CampusBoundary {
            name: "NTUT Campus".to_string(),
            vertices: NTUT_BOUNDARY
                .iter()
                .map(|(lat, lng)| GeoPoint::new(*lat, *lng))
                .collect(),
            style: BoundaryStyle::default(),
        },
        buildings: vec![
            building(1, "General Building", 25.0427, 121.5359, BuildingType::Academic),
            building(2, "Engineering Building", 25.0438, 121.5347, BuildingType::Academic),
            building(3, "Design Building", 25.042540, 121.5337, BuildingType::Academic),
            building(4, "Chemical Engineering Building", 25.0438, 121.5344, BuildingType::Facility),
        ],
        evacuation_points: vec![
            evacuation_point(1, "Sports Field", 25.0430, 121.5348),
            evacuation_point(2, "Design Plaza", 25.0430, 121.5334),
            evacuation_point(3, "West Lawn", 25.0437, 121.5334),
        ],
        hazards: vec![
            hazard(1, "Chemical Lab A", HazardType::Chemical, HazardLevel::High, 25.04283, 121.53594, "General Building"),
            hazard(2, "Mechanical Factory", HazardType::Mechanical, HazardLevel::Medium, 25.0438, 121.5347, "Engineering Building"),
            hazard(3, "Electrical Equipment Room", HazardType::Electrical, HazardLevel::Low, 25.042540, 121.5337, "Design Building"),
            hazard(4, "Storage Warehouse", HazardType::Storage, HazardLevel::High, 25.0438, 121.5344, "Chemical Engineering Building"),
            hazard(5, "Chemical Lab B", HazardType::Chemical, HazardLevel::Medium, 25.0427, 121.5359, "General Building"),
        ],
    }
}
