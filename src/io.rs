use crate::idle::IdleEntry;
use crate::model::{ContractCategory, ContractPolicy, PolicyTable, Rotation, RotationCatalog};
use crate::pipeline::PlanReport;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import des rotations : header `start_date,end_date,duration_hours,engagement_days`
/// (dates `YYYY-MM-DD`).
pub fn import_rotations_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<RotationCatalog> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let line = idx + 2;
        let start = parse_date(rec.get(0).context("missing start_date")?)
            .with_context(|| format!("row {line}: start_date"))?;
        let end = parse_date(rec.get(1).context("missing end_date")?)
            .with_context(|| format!("row {line}: end_date"))?;
        let hours = parse_number(rec.get(2).context("missing duration_hours")?)
            .with_context(|| format!("row {line}: duration_hours"))?;
        let days = parse_number(rec.get(3).context("missing engagement_days")?)
            .with_context(|| format!("row {line}: engagement_days"))?;
        let rotation = Rotation {
            start_date: start,
            end_date: end,
            duration_hours: hours,
            engagement_days: days,
        };
        // numéro de ligne du fichier (en-tête = ligne 1)
        rotation.validate(line)?;
        out.push(rotation);
    }
    Ok(RotationCatalog::new(out)?)
}

/// Import des politiques : header `category,working_days_per_month,existing_headcount`
pub fn import_policies_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<PolicyTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let line = idx + 2;
        let category: ContractCategory = rec
            .get(0)
            .context("missing category")?
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {line}: category"))?;
        let working_days_per_month = parse_number(rec.get(1).context("missing working_days_per_month")?)
            .with_context(|| format!("row {line}: working_days_per_month"))?;
        let existing_headcount = match rec.get(2).map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("row {line}: existing_headcount must be a non-negative integer"))?,
        };
        out.push(ContractPolicy {
            category,
            working_days_per_month,
            existing_headcount,
        });
    }
    Ok(PolicyTable::new(out)?)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn parse_number(raw: &str) -> anyhow::Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty number");
    }
    // virgule décimale acceptée (exports tableur FR)
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .with_context(|| format!("invalid number: {raw}"))?;
    Ok(value)
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &PlanReport) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning : header
/// `pilot_id,category,start_date,end_date,duration_hours,engagement_days`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, plan: &PlanReport) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "pilot_id",
        "category",
        "start_date",
        "end_date",
        "duration_hours",
        "engagement_days",
    ])?;
    for slot in &plan.assignment.slots {
        for r in &slot.rotations {
            let start = r.start_date.to_string();
            let end = r.end_date.to_string();
            let hours = r.duration_hours.to_string();
            let days = r.engagement_days.to_string();
            w.write_record([
                slot.pilot_id.as_str(),
                slot.category.as_str(),
                start.as_str(),
                end.as_str(),
                hours.as_str(),
                days.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des jours sans rotation : header `pilot_id,idle_days`
pub fn export_idle_csv<P: AsRef<Path>>(path: P, idle: &[IdleEntry]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["pilot_id", "idle_days"])?;
    for entry in idle {
        let count = entry.idle_day_count.to_string();
        w.write_record([entry.pilot_id.as_str(), count.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
