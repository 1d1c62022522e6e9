//! Enchaînement dimensionnement → affectation → jours sans rotation.
//!
//! Chaque étape consomme la sortie complète de la précédente. Une erreur de
//! dimensionnement arrête tout ; les rotations non affectées sont des données.

use crate::assigner::{self, AssignOptions, Assignment};
use crate::error::PlanError;
use crate::idle::{self, IdleEntry};
use crate::model::{ContractCategory, PlanningHorizon, PolicyTable, RotationCatalog};
use crate::sizing::{self, SizingOptions, SizingReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub sizing: SizingOptions,
    pub assign: AssignOptions,
}

/// Plan complet, prêt pour l'affichage ou l'export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub horizon: Option<PlanningHorizon>,
    pub sizing: SizingReport,
    pub category_share: BTreeMap<ContractCategory, f64>,
    pub assignment: Assignment,
    pub idle: Vec<IdleEntry>,
    pub options: PlanOptions,
}

impl PlanReport {
    pub fn is_complete(&self) -> bool {
        self.assignment.unassigned.is_empty()
    }
}

pub fn plan(
    catalog: &RotationCatalog,
    policies: &PolicyTable,
    opts: PlanOptions,
) -> Result<PlanReport, PlanError> {
    let sizing = sizing::size(catalog, policies, opts.sizing)?;
    let category_share = sizing.category_share();
    let assignment = assigner::assign(catalog, &sizing.used_by_category, opts.assign);
    let horizon = catalog.horizon();
    let idle = idle::idle_report(horizon.as_ref(), &assignment);

    Ok(PlanReport {
        horizon,
        sizing,
        category_share,
        assignment,
        idle,
        options: opts,
    })
}
