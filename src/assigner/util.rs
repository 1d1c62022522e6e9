use super::CollisionPolicy;
use crate::model::{ContractCategory, PilotSlot, Rotation};
use std::collections::BTreeMap;

pub(super) fn same_start(a: &Rotation, b: &Rotation) -> bool {
    a.start_date == b.start_date
}

/// Vrai si `slot` peut recevoir `rotation` sous la règle `policy`.
pub(super) fn admits(policy: CollisionPolicy, slot: &PilotSlot, rotation: &Rotation) -> bool {
    match policy {
        CollisionPolicy::StartDateOnly => !slot.rotations.iter().any(|r| same_start(r, rotation)),
        CollisionPolicy::FullOverlap => !slot.rotations.iter().any(|r| r.overlaps(rotation)),
    }
}

/// `floor(count)` pilotes par catégorie, dans l'ordre des catégories.
/// Retourne aussi la fraction abandonnée quand elle est non nulle.
pub(super) fn instantiate_slots(
    counts: &BTreeMap<ContractCategory, f64>,
) -> (Vec<PilotSlot>, BTreeMap<ContractCategory, f64>) {
    let mut slots = Vec::new();
    let mut truncated = BTreeMap::new();

    for (category, count) in counts {
        // NaN.max(0.0) == 0.0
        let count = count.max(0.0);
        let whole = count.floor();
        let dropped = count - whole;
        if dropped > 0.0 {
            truncated.insert(*category, dropped);
        }
        let n = whole.min(f64::from(u32::MAX)) as u32;
        slots.extend((1..=n).map(|number| PilotSlot::new(*category, number)));
    }

    (slots, truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rot(start: u32, end: u32) -> Rotation {
        Rotation::new(
            NaiveDate::from_ymd_opt(2024, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, end).unwrap(),
            5.0,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn truncates_fractional_counts() {
        let mut counts = BTreeMap::new();
        counts.insert(ContractCategory::Contracted, 2.36);
        counts.insert(ContractCategory::Resident, 3.0);
        let (slots, truncated) = instantiate_slots(&counts);
        let ids: Vec<&str> = slots.iter().map(|s| s.pilot_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "Pilot_Resident_1",
                "Pilot_Resident_2",
                "Pilot_Resident_3",
                "Pilot_Contracted_1",
                "Pilot_Contracted_2"
            ]
        );
        assert!((truncated[&ContractCategory::Contracted] - 0.36).abs() < 1e-9);
        assert!(!truncated.contains_key(&ContractCategory::Resident));
    }

    #[test]
    fn start_date_rule_misses_nested_overlap() {
        let mut slot = PilotSlot::new(ContractCategory::Resident, 1);
        slot.rotations.push(rot(1, 5));
        let nested = rot(3, 4);
        assert!(admits(CollisionPolicy::StartDateOnly, &slot, &nested));
        assert!(!admits(CollisionPolicy::FullOverlap, &slot, &nested));
        assert!(!admits(CollisionPolicy::StartDateOnly, &slot, &rot(1, 1)));
        assert!(admits(CollisionPolicy::FullOverlap, &slot, &rot(6, 7)));
    }
}
