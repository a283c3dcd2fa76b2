//! Hazard list filtering and summary counts for the legend panel.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::hazard::{Hazard, HazardLevel, HazardType};

/// Which hazards the map should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HazardFilter {
    #[default]
    All,
    Only(HazardType),
}

impl HazardFilter {
    pub fn matches(&self, hazard: &Hazard) -> bool {
        match self {
            HazardFilter::All => true,
            HazardFilter::Only(t) => hazard.hazard_type == *t,
        }
    }
}

/// Returns the hazards passing `filter`, in input order.
pub fn filter_hazards(hazards: &[Hazard], filter: HazardFilter) -> Vec<&Hazard> {
    let filtered: Vec<&Hazard> = hazards.iter().filter(|h| filter.matches(h)).collect();
    debug!(
        "filter {:?} kept {} of {} hazards",
        filter,
        filtered.len(),
        hazards.len()
    );
    filtered
}

/// Counts of hazards by type and by level.
///
/// Every level appears in `by_level` even when its count is zero. Types
/// only appear once at least one hazard has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HazardStats {
    pub total: usize,
    pub by_type: BTreeMap<HazardType, usize>,
    pub by_level: BTreeMap<HazardLevel, usize>,
}

impl HazardStats {
    pub fn from_hazards(hazards: &[Hazard]) -> Self {
        let mut by_type = BTreeMap::new();
        let mut by_level: BTreeMap<HazardLevel, usize> =
            HazardLevel::ALL.iter().map(|level| (*level, 0)).collect();

        for hazard in hazards {
            *by_type.entry(hazard.hazard_type).or_insert(0) += 1;
            *by_level.entry(hazard.level).or_insert(0) += 1;
        }

        HazardStats {
            total: hazards.len(),
            by_type,
            by_level,
        }
    }
}
