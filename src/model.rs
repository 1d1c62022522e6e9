use crate::error::PlanError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Rotation de vol (dates incluses, sans identifiant).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_hours: f64,
    pub engagement_days: f64,
}

impl Rotation {
    /// Crée une rotation en validant `start_date <= end_date`.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_hours: f64,
        engagement_days: f64,
    ) -> Result<Self, PlanError> {
        let rotation = Self {
            start_date,
            end_date,
            duration_hours,
            engagement_days,
        };
        rotation.validate(0)?;
        Ok(rotation)
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), PlanError> {
        if self.end_date < self.start_date {
            return Err(PlanError::InvalidDateRange {
                index,
                start: self.start_date,
                end: self.end_date,
            });
        }
        for (field, value) in [
            ("duration_hours", self.duration_hours),
            ("engagement_days", self.engagement_days),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidWorkload { index, field, value });
            }
        }
        Ok(())
    }

    /// Jours couverts, de `start_date` à `end_date` inclus.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Chevauchement de plages de dates incluses.
    pub fn overlaps(&self, other: &Rotation) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// Catalogue des rotations à couvrir, validé au chargement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RotationCatalog {
    rotations: Vec<Rotation>,
}

impl RotationCatalog {
    /// Rejette toute ligne dont la fin précède le début ou dont la charge est négative.
    pub fn new(rotations: Vec<Rotation>) -> Result<Self, PlanError> {
        for (index, rotation) in rotations.iter().enumerate() {
            rotation.validate(index)?;
        }
        Ok(Self { rotations })
    }

    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn total_hours(&self) -> f64 {
        self.rotations.iter().map(|r| r.duration_hours).sum()
    }

    pub fn total_engagement_days(&self) -> f64 {
        self.rotations.iter().map(|r| r.engagement_days).sum()
    }

    /// Période de planification ; `None` si le catalogue est vide.
    pub fn horizon(&self) -> Option<PlanningHorizon> {
        let start = self.rotations.iter().map(|r| r.start_date).min()?;
        let end = self.rotations.iter().map(|r| r.end_date).max()?;
        Some(PlanningHorizon { start, end })
    }
}

/// Période [start, end] incluse, au jour près.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningHorizon {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PlanningHorizon {
    pub fn len_days(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Catégorie contractuelle. L'ordre (`Ord`) fixe l'ordre de parcours des pilotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractCategory {
    #[serde(alias = "Ivoirien", alias = "resident")]
    Resident,
    #[serde(alias = "Location", alias = "Leased", alias = "contracted")]
    Contracted,
}

impl ContractCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractCategory::Resident => "Resident",
            ContractCategory::Contracted => "Contracted",
        }
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resident" | "ivoirien" => Ok(ContractCategory::Resident),
            "contracted" | "location" | "leased" => Ok(ContractCategory::Contracted),
            other => Err(format!("unknown contract category: {other}")),
        }
    }
}

/// Paramètres de capacité d'une catégorie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractPolicy {
    pub category: ContractCategory,
    pub working_days_per_month: f64,
    #[serde(default)]
    pub existing_headcount: u32,
}

/// Table des politiques contractuelles, une entrée par catégorie.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyTable {
    policies: BTreeMap<ContractCategory, ContractPolicy>,
}

impl PolicyTable {
    pub fn new(records: Vec<ContractPolicy>) -> Result<Self, PlanError> {
        let mut policies = BTreeMap::new();
        for policy in records {
            if policies.insert(policy.category, policy).is_some() {
                return Err(PlanError::DuplicateCategory(policy.category));
            }
        }
        Ok(Self { policies })
    }

    pub fn get(&self, category: ContractCategory) -> Option<&ContractPolicy> {
        self.policies.get(&category)
    }

    /// Politique obligatoire : absente → `MissingCategory`.
    pub fn require(&self, category: ContractCategory) -> Result<&ContractPolicy, PlanError> {
        self.get(category)
            .ok_or(PlanError::MissingCategory(category))
    }
}

/// Identifiant d'un pilote virtuel, ex. `Pilot_Resident_3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PilotId(String);

impl PilotId {
    pub fn for_slot(category: ContractCategory, number: u32) -> Self {
        Self(format!("Pilot_{category}_{number}"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PilotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pilote virtuel et ses rotations, dans l'ordre d'affectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotSlot {
    pub pilot_id: PilotId,
    pub category: ContractCategory,
    pub number: u32,
    #[serde(default)]
    pub rotations: Vec<Rotation>,
}

impl PilotSlot {
    pub fn new(category: ContractCategory, number: u32) -> Self {
        Self {
            pilot_id: PilotId::for_slot(category, number),
            category,
            number,
            rotations: Vec::new(),
        }
    }
}
