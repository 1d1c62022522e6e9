use super::{util, Assignment, CollisionPolicy};
use crate::model::{ContractCategory, RotationCatalog};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

pub(super) fn assign_with_rng<R: Rng + ?Sized>(
    catalog: &RotationCatalog,
    counts: &BTreeMap<ContractCategory, f64>,
    collision: CollisionPolicy,
    rng: &mut R,
) -> Assignment {
    let (mut slots, truncated) = util::instantiate_slots(counts);

    #[cfg(feature = "logging")]
    for (category, dropped) in &truncated {
        tracing::warn!(%category, dropped, "fractional pilot dropped when instantiating slots");
    }

    // une seule passe sur une permutation : chaque rotation n'est proposée qu'une fois
    let mut order: Vec<usize> = (0..catalog.len()).collect();
    order.shuffle(rng);

    let rotations = catalog.rotations();
    let mut unassigned = Vec::new();

    for index in order {
        let rotation = rotations[index];
        match slots
            .iter_mut()
            .find(|slot| util::admits(collision, slot, &rotation))
        {
            Some(slot) => {
                #[cfg(feature = "logging")]
                tracing::debug!(
                    pilot = %slot.pilot_id,
                    start = %rotation.start_date,
                    end = %rotation.end_date,
                    "rotation assigned"
                );
                slot.rotations.push(rotation);
            }
            None => unassigned.push(rotation),
        }
    }

    let assignment = Assignment {
        slots,
        unassigned,
        truncated,
    };

    #[cfg(feature = "logging")]
    {
        tracing::info!(
            pilots = assignment.slots.len(),
            assigned = assignment.assigned_count(),
            unassigned = assignment.unassigned.len(),
            %collision,
            "assignment done"
        );
        if !assignment.unassigned.is_empty() {
            tracing::warn!(
                count = assignment.unassigned.len(),
                "rotations left without a pilot"
            );
        }
    }

    assignment
}
