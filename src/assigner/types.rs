use crate::model::{ContractCategory, PilotId, PilotSlot, Rotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Règle de collision entre deux rotations d'un même pilote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Refuse seulement deux rotations qui démarrent le même jour.
    /// Une rotation qui commence pendant une autre n'est pas détectée.
    #[default]
    StartDateOnly,
    /// Refuse tout chevauchement de plages de dates incluses.
    FullOverlap,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "start-date-only" | "start-date" => Ok(CollisionPolicy::StartDateOnly),
            "full-overlap" | "overlap" => Ok(CollisionPolicy::FullOverlap),
            other => Err(format!("unknown collision policy: {other}")),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollisionPolicy::StartDateOnly => "start-date-only",
            CollisionPolicy::FullOverlap => "full-overlap",
        })
    }
}

/// Options d'affectation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignOptions {
    /// Graine de la permutation ; `None` = entropie système (non déterministe).
    pub seed: Option<u64>,
    pub collision: CollisionPolicy,
}

/// Résultat de l'affectation gloutonne.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Pilotes dans l'ordre fixe des catégories, puis par numéro.
    pub slots: Vec<PilotSlot>,
    /// Rotations restées sans pilote, dans l'ordre où elles ont été proposées.
    pub unassigned: Vec<Rotation>,
    /// Fraction de pilote perdue à la troncature, par catégorie (si non nulle).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub truncated: BTreeMap<ContractCategory, f64>,
}

impl Assignment {
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().map(|s| s.rotations.len()).sum()
    }

    pub fn total_rotations(&self) -> usize {
        self.assigned_count() + self.unassigned.len()
    }

    pub fn slot(&self, pilot: &PilotId) -> Option<&PilotSlot> {
        self.slots.iter().find(|s| &s.pilot_id == pilot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    SameStartDate,
    Overlap,
}

/// Paire de rotations en conflit chez un même pilote (positions dans `PilotSlot::rotations`).
#[derive(Debug, Clone)]
pub struct Conflict {
    pub pilot: PilotId,
    pub rotation_a: usize,
    pub rotation_b: usize,
    pub kind: ConflictKind,
}
