use crate::model::ContractCategory;
use chrono::NaiveDate;
use thiserror::Error;

/// Famille d'erreur, pour l'affichage et les codes de sortie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    DataIntegrity,
    Other,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("missing contract category in policy table: {0}")]
    MissingCategory(ContractCategory),
    #[error("invalid capacity for {category}: working_days_per_month must be > 0 (got {value})")]
    InvalidCapacity {
        category: ContractCategory,
        value: f64,
    },
    #[error("primary and secondary contract categories must differ (both {0})")]
    SameCategory(ContractCategory),
    #[error("duplicate contract category in policy table: {0}")]
    DuplicateCategory(ContractCategory),
    /// `index` : position dans le catalogue, ou ligne du fichier pour un import CSV.
    #[error("row {index}: end_date {end} is before start_date {start}")]
    InvalidDateRange {
        index: usize,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("row {index}: {field} must be a non-negative number (got {value})")]
    InvalidWorkload {
        index: usize,
        field: &'static str,
        value: f64,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::MissingCategory(_)
            | PlanError::InvalidCapacity { .. }
            | PlanError::DuplicateCategory(_)
            | PlanError::SameCategory(_) => ErrorKind::Configuration,
            PlanError::InvalidDateRange { .. } | PlanError::InvalidWorkload { .. } => {
                ErrorKind::DataIntegrity
            }
            PlanError::Other(_) => ErrorKind::Other,
        }
    }
}
