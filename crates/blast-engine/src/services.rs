//! Rule-based emergency service recommendation

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::impact::{InjuryStatus, PersonRecord};

/// Emergency services, declared in rule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmergencyService {
    Ambulance,
    FireBrigade,
    RescueTeam,
    BombDisposalSquad,
}

impl EmergencyService {
    pub fn label(&self) -> &'static str {
        match self {
            EmergencyService::Ambulance => "Ambulance",
            EmergencyService::FireBrigade => "Fire Brigade",
            EmergencyService::RescueTeam => "Rescue Team",
            EmergencyService::BombDisposalSquad => "Bomb Disposal Squad",
        }
    }
}

impl fmt::Display for EmergencyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EmergencyService {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Fatalities needed before an ambulance is requested
const AMBULANCE_MIN_FATALITIES: usize = 2;
const FIRE_LABELS: &[&str] = &["fire", "smoke"];
const VEHICLE_LABEL: &str = "car";
const UNATTENDED_BAG_LABELS: &[&str] = &["backpack", "suitcase"];

/// Distinct services, iterated and serialized in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceRecommendation(BTreeSet<EmergencyService>);

impl ServiceRecommendation {
    pub fn contains(&self, service: EmergencyService) -> bool {
        self.0.contains(&service)
    }

    pub fn iter(&self) -> impl Iterator<Item = EmergencyService> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EmergencyService> for ServiceRecommendation {
    fn from_iter<I: IntoIterator<Item = EmergencyService>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Recommend services from person statuses and after-image labels
pub fn recommend_services<'a>(
    people: &[PersonRecord],
    labels: impl IntoIterator<Item = &'a str>,
) -> ServiceRecommendation {
    let fatal_count = people
        .iter()
        .filter(|p| p.status == InjuryStatus::Fatal)
        .count();
    let labels: BTreeSet<&str> = labels.into_iter().collect();
    let any_of = |wanted: &[&str]| wanted.iter().any(|l| labels.contains(l));

    let mut services = BTreeSet::new();

    if fatal_count >= AMBULANCE_MIN_FATALITIES {
        services.insert(EmergencyService::Ambulance);
    }
    if any_of(FIRE_LABELS) {
        services.insert(EmergencyService::FireBrigade);
    }
    if labels.contains(VEHICLE_LABEL) && fatal_count > 0 {
        services.insert(EmergencyService::RescueTeam);
    }
    if any_of(UNATTENDED_BAG_LABELS) {
        services.insert(EmergencyService::BombDisposalSquad);
    }

    debug!(fatal_count, services = ?services, "Recommended services");
    ServiceRecommendation(services)
}
