use super::{util, Assignment, Conflict, ConflictKind};

/// Audit a posteriori : paires de rotations d'un même pilote qui démarrent
/// le même jour ou dont les plages se chevauchent.
pub(super) fn detect_conflicts(assignment: &Assignment) -> Vec<Conflict> {
    let mut out = Vec::new();

    for slot in &assignment.slots {
        for (idx, a) in slot.rotations.iter().enumerate() {
            for (jdx, b) in slot.rotations.iter().enumerate().skip(idx + 1) {
                let kind = if util::same_start(a, b) {
                    ConflictKind::SameStartDate
                } else if a.overlaps(b) {
                    ConflictKind::Overlap
                } else {
                    continue;
                };
                out.push(Conflict {
                    pilot: slot.pilot_id.clone(),
                    rotation_a: idx,
                    rotation_b: jdx,
                    kind,
                });
            }
        }
    }

    out
}
