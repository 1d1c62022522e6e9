use crate::assigner::Assignment;
use crate::model::{PilotId, PilotSlot, PlanningHorizon};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleEntry {
    pub pilot_id: PilotId,
    pub idle_day_count: u32,
}

/// Jours de la période couverts par au moins une rotation du pilote.
pub fn covered_dates(horizon: &PlanningHorizon, slot: &PilotSlot) -> BTreeSet<NaiveDate> {
    slot.rotations
        .iter()
        .flat_map(|r| r.days())
        .filter(|d| horizon.contains(*d))
        .collect()
}

/// `horizon \ ⋃ [start_date, end_date]`.
pub fn free_dates(horizon: &PlanningHorizon, slot: &PilotSlot) -> BTreeSet<NaiveDate> {
    let covered = covered_dates(horizon, slot);
    horizon.dates().filter(|d| !covered.contains(d)).collect()
}

pub fn idle_days(horizon: &PlanningHorizon, slot: &PilotSlot) -> u32 {
    let covered = u32::try_from(covered_dates(horizon, slot).len()).unwrap_or(u32::MAX);
    horizon.len_days().saturating_sub(covered)
}

/// Jours sans rotation par pilote, dans l'ordre des pilotes.
/// Sans période (catalogue vide), chaque pilote compte 0 jour.
pub fn idle_report(horizon: Option<&PlanningHorizon>, assignment: &Assignment) -> Vec<IdleEntry> {
    assignment
        .slots
        .iter()
        .map(|slot| IdleEntry {
            pilot_id: slot.pilot_id.clone(),
            idle_day_count: horizon.map_or(0, |h| idle_days(h, slot)),
        })
        .collect()
}
