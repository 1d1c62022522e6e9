//! Affectation gloutonne des rotations aux pilotes virtuels.
//!
//! Une seule passe sur une permutation aléatoire des rotations : chaque rotation
//! va au premier pilote (catégories dans l'ordre fixe, puis par numéro) que la
//! règle de collision accepte. Pas de retour arrière ; ce n'est pas un solveur.
//! Les effectifs fractionnaires sont tronqués vers zéro : `2.36` donne deux pilotes.

mod assignment;
mod conflicts;
mod types;
mod util;

pub use types::{AssignOptions, Assignment, CollisionPolicy, Conflict, ConflictKind};

use crate::model::{ContractCategory, RotationCatalog};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Affecte avec un `StdRng` construit depuis `opts.seed`, ou depuis l'entropie
/// système quand aucune graine n'est fournie.
pub fn assign(
    catalog: &RotationCatalog,
    counts: &BTreeMap<ContractCategory, f64>,
    opts: AssignOptions,
) -> Assignment {
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    assignment::assign_with_rng(catalog, counts, opts.collision, &mut rng)
}

/// Variante avec une source aléatoire injectée.
pub fn assign_with_rng<R: Rng + ?Sized>(
    catalog: &RotationCatalog,
    counts: &BTreeMap<ContractCategory, f64>,
    collision: CollisionPolicy,
    rng: &mut R,
) -> Assignment {
    assignment::assign_with_rng(catalog, counts, collision, rng)
}

pub fn detect_conflicts(assignment: &Assignment) -> Vec<Conflict> {
    conflicts::detect_conflicts(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rotation;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn rot(start: u32, end: u32) -> Rotation {
        Rotation::new(
            NaiveDate::from_ymd_opt(2024, 2, start).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, end).unwrap(),
            6.0,
            f64::from(end - start + 1),
        )
        .unwrap()
    }

    fn counts(resident: f64, contracted: f64) -> BTreeMap<ContractCategory, f64> {
        BTreeMap::from([
            (ContractCategory::Resident, resident),
            (ContractCategory::Contracted, contracted),
        ])
    }

    fn seeded(collision: CollisionPolicy) -> AssignOptions {
        AssignOptions {
            seed: Some(42),
            collision,
        }
    }

    #[test]
    fn same_start_single_pilot() {
        let catalog = RotationCatalog::new(vec![rot(1, 2), rot(1, 3), rot(1, 1)]).unwrap();
        let out = assign(&catalog, &counts(1.0, 0.0), seeded(CollisionPolicy::StartDateOnly));
        assert_eq!(out.assigned_count(), 1);
        assert_eq!(out.unassigned.len(), 2);
    }

    #[test]
    fn no_slots_leaves_everything_unassigned() {
        let catalog = RotationCatalog::new(vec![rot(1, 2), rot(4, 5)]).unwrap();
        let out = assign(&catalog, &counts(0.0, 0.9), seeded(CollisionPolicy::StartDateOnly));
        assert!(out.slots.is_empty());
        assert_eq!(out.unassigned.len(), 2);
        assert!((out.truncated[&ContractCategory::Contracted] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn conservation_and_start_date_invariant() {
        let rotations: Vec<Rotation> = (1..=20)
            .map(|i| rot(1 + i % 7, 1 + i % 7 + i % 3))
            .collect();
        let catalog = RotationCatalog::new(rotations).unwrap();
        for seed in 0..25 {
            let out = assign(
                &catalog,
                &counts(2.0, 1.5),
                AssignOptions {
                    seed: Some(seed),
                    collision: CollisionPolicy::StartDateOnly,
                },
            );
            assert_eq!(out.total_rotations(), catalog.len());
            assert_eq!(out.slots.len(), 3);
            for slot in &out.slots {
                let starts: HashSet<_> = slot.rotations.iter().map(|r| r.start_date).collect();
                assert_eq!(starts.len(), slot.rotations.len());
            }
            assert!(detect_conflicts(&out)
                .iter()
                .all(|c| c.kind == ConflictKind::Overlap));
        }
    }

    #[test]
    fn full_overlap_policy_yields_no_conflicts() {
        let rotations: Vec<Rotation> = (1..=15).map(|i| rot(i, i + 2)).collect();
        let catalog = RotationCatalog::new(rotations).unwrap();
        let out = assign(&catalog, &counts(2.0, 1.0), seeded(CollisionPolicy::FullOverlap));
        assert_eq!(out.total_rotations(), 15);
        assert!(detect_conflicts(&out).is_empty());
    }

    #[test]
    fn same_seed_same_assignment() {
        let rotations: Vec<Rotation> = (1..=12).map(|i| rot(i, i + 1)).collect();
        let catalog = RotationCatalog::new(rotations).unwrap();
        let opts = seeded(CollisionPolicy::StartDateOnly);
        let a = assign(&catalog, &counts(3.0, 2.0), opts);
        let b = assign(&catalog, &counts(3.0, 2.0), opts);
        assert_eq!(a, b);
    }

    #[test]
    fn residents_are_scanned_first() {
        let catalog = RotationCatalog::new(vec![rot(3, 4)]).unwrap();
        let out = assign(&catalog, &counts(1.0, 1.0), seeded(CollisionPolicy::StartDateOnly));
        assert_eq!(out.slots[0].category, ContractCategory::Resident);
        assert_eq!(out.slots[0].rotations.len(), 1);
        assert!(out.slots[1].rotations.is_empty());
    }

    #[test]
    fn start_date_rule_lets_nested_rotations_through() {
        let catalog = RotationCatalog::new(vec![rot(1, 10), rot(2, 3)]).unwrap();
        let out = assign(&catalog, &counts(1.0, 0.0), seeded(CollisionPolicy::StartDateOnly));
        assert_eq!(out.assigned_count(), 2);
        let conflicts = detect_conflicts(&out);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);

        let strict = assign(&catalog, &counts(1.0, 0.0), seeded(CollisionPolicy::FullOverlap));
        assert_eq!(strict.assigned_count(), 1);
        assert_eq!(strict.unassigned.len(), 1);
    }
}
