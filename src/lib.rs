#![forbid(unsafe_code)]
//! Equipage — dimensionnement des effectifs pilotes (sans BD).
//!
//! - Effectif requis par catégorie contractuelle (résidents, location).
//! - Affectation gloutonne des rotations, permutation aléatoire seedable.
//! - Jours sans rotation par pilote sur la période de planification.
//! - Import CSV, export JSON/CSV ; pas de rendu graphique dans la lib.

pub mod assigner;
pub mod error;
pub mod idle;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod sizing;
pub mod storage;

pub use assigner::{
    assign, assign_with_rng, detect_conflicts, AssignOptions, Assignment, CollisionPolicy,
    Conflict, ConflictKind,
};
pub use error::{ErrorKind, PlanError};
pub use idle::{free_dates, idle_days, idle_report, IdleEntry};
pub use model::{
    ContractCategory, ContractPolicy, PilotId, PilotSlot, PlanningHorizon, PolicyTable, Rotation,
    RotationCatalog,
};
pub use pipeline::{plan, PlanOptions, PlanReport};
pub use sizing::{size, SizingOptions, SizingReport};
pub use storage::{JsonStorage, Storage};
