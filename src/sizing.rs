//! Dimensionnement : effectif requis et répartition par catégorie contractuelle.
//!
//! `required = ceil(Σ jours d'engagement / jours travaillés par mois [primaire])`.
//! Le primaire est servi dans la limite de son effectif existant ; le reste est
//! converti en équivalent secondaire au ratio des capacités mensuelles.

use crate::error::PlanError;
use crate::model::{ContractCategory, PolicyTable, RotationCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catégories qui ancrent la demande (primaire) et absorbent le reste (secondaire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingOptions {
    pub primary: ContractCategory,
    pub secondary: ContractCategory,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            primary: ContractCategory::Resident,
            secondary: ContractCategory::Contracted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub total_hours: f64,
    pub total_engagement_days: f64,
    pub required_headcount: u32,
    /// Effectif utilisé par catégorie ; le secondaire peut être fractionnaire.
    pub used_by_category: BTreeMap<ContractCategory, f64>,
    /// Heures par pilote requis ; `None` quand aucun pilote n'est requis.
    pub productivity: Option<f64>,
}

impl SizingReport {
    /// Part de chaque catégorie dans l'effectif utilisé (vide si rien n'est utilisé).
    pub fn category_share(&self) -> BTreeMap<ContractCategory, f64> {
        let total: f64 = self.used_by_category.values().sum();
        if total <= 0.0 {
            return BTreeMap::new();
        }
        self.used_by_category
            .iter()
            .map(|(cat, used)| (*cat, used / total))
            .collect()
    }
}

/// Calcule l'effectif requis. Fonction pure.
pub fn size(
    catalog: &RotationCatalog,
    policies: &PolicyTable,
    opts: SizingOptions,
) -> Result<SizingReport, PlanError> {
    if opts.primary == opts.secondary {
        return Err(PlanError::SameCategory(opts.primary));
    }
    let primary = policies.require(opts.primary)?;
    let secondary = policies.require(opts.secondary)?;
    let wp = capacity(opts.primary, primary.working_days_per_month)?;
    let ws = capacity(opts.secondary, secondary.working_days_per_month)?;

    let total_hours = catalog.total_hours();
    let total_engagement_days = catalog.total_engagement_days();
    let required_headcount = required_headcount(total_engagement_days, wp);

    let used_primary = required_headcount.min(primary.existing_headcount);
    let used_secondary = if used_primary < required_headcount {
        f64::from(required_headcount - used_primary) * wp / ws
    } else {
        0.0
    };

    let mut used_by_category = BTreeMap::new();
    used_by_category.insert(opts.primary, f64::from(used_primary));
    used_by_category.insert(opts.secondary, used_secondary);

    let productivity = if required_headcount > 0 {
        Some(total_hours / f64::from(required_headcount))
    } else {
        None
    };

    #[cfg(feature = "logging")]
    tracing::info!(
        total_hours,
        total_engagement_days,
        required_headcount,
        used_primary,
        used_secondary,
        "sizing computed"
    );

    Ok(SizingReport {
        total_hours,
        total_engagement_days,
        required_headcount,
        used_by_category,
        productivity,
    })
}

/// `ceil(days / working_days_per_month)`, jamais nul dès que `days > 0`.
pub fn required_headcount(total_engagement_days: f64, working_days_per_month: f64) -> u32 {
    if total_engagement_days <= 0.0 {
        return 0;
    }
    let ratio = (total_engagement_days / working_days_per_month).ceil();
    // saturation au-delà de u32::MAX
    ratio.min(f64::from(u32::MAX)) as u32
}

fn capacity(category: ContractCategory, value: f64) -> Result<f64, PlanError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PlanError::InvalidCapacity { category, value });
    }
    Ok(value)
}
