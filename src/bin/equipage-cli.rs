#![forbid(unsafe_code)]
use anyhow::Result;
use equipage::{
    assigner::{detect_conflicts, AssignOptions, CollisionPolicy, ConflictKind},
    io,
    model::ContractCategory,
    pipeline::{plan, PlanOptions, PlanReport},
    sizing::{size, SizingOptions, SizingReport},
    storage::{JsonStorage, Storage},
};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de dimensionnement pilotes (simulation gloutonne, non optimale)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct Inputs {
    /// CSV `start_date,end_date,duration_hours,engagement_days`
    #[arg(long)]
    rotations: String,
    /// CSV `category,working_days_per_month,existing_headcount`
    #[arg(long)]
    policies: String,
    #[arg(long, default_value = "resident")]
    primary: ContractCategory,
    #[arg(long, default_value = "contracted")]
    secondary: ContractCategory,
}

impl Inputs {
    fn sizing_options(&self) -> SizingOptions {
        SizingOptions {
            primary: self.primary,
            secondary: self.secondary,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer l'effectif requis et sa répartition
    Size {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Dimensionner, affecter les rotations et calculer les jours sans rotation
    Plan {
        #[command(flatten)]
        inputs: Inputs,
        /// Graine de la permutation (par défaut : non déterministe)
        #[arg(long)]
        seed: Option<u64>,
        /// `start-date-only` ou `full-overlap`
        #[arg(long, default_value = "start-date-only")]
        collision: CollisionPolicy,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_schedule: Option<String>,
        #[arg(long)]
        out_idle: Option<String>,
    },

    /// Afficher le planning et les jours sans rotation d'un plan enregistré
    Show,

    /// Vérifier les conflits d'un plan enregistré
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;

    let code = match cli.cmd {
        Commands::Size { inputs } => {
            let catalog = io::import_rotations_csv(&inputs.rotations)?;
            let policies = io::import_policies_csv(&inputs.policies)?;
            let report = size(&catalog, &policies, inputs.sizing_options())?;
            print_sizing(&report, &report.category_share());
            0
        }
        Commands::Plan {
            inputs,
            seed,
            collision,
            out_json,
            out_schedule,
            out_idle,
        } => {
            let catalog = io::import_rotations_csv(&inputs.rotations)?;
            let policies = io::import_policies_csv(&inputs.policies)?;
            let opts = PlanOptions {
                sizing: inputs.sizing_options(),
                assign: AssignOptions { seed, collision },
            };
            let report = plan(&catalog, &policies, opts)?;
            storage.save(&report)?;
            if let Some(path) = out_json {
                io::export_plan_json(path, &report)?;
            }
            if let Some(path) = out_schedule {
                io::export_schedule_csv(path, &report)?;
            }
            if let Some(path) = out_idle {
                io::export_idle_csv(path, &report.idle)?;
            }
            print_sizing(&report.sizing, &report.category_share);
            println!(
                "Rotations: {} assigned, {} unassigned",
                report.assignment.assigned_count(),
                report.assignment.unassigned.len()
            );
            for (category, dropped) in &report.assignment.truncated {
                eprintln!("Warning: {dropped:.2} {category} pilot(s) dropped (fractional headcount)");
            }
            // Code 2 = WARNING/INCOMPLETE
            if report.is_complete() {
                0
            } else {
                2
            }
        }
        Commands::Show => {
            let report = storage.load()?;
            print_timeline(&report);
            0
        }
        Commands::Check { report } => {
            let plan = storage.load()?;
            let conflicts = detect_conflicts(&plan.assignment);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["pilot_id", "rotation_a", "rotation_b", "kind"])?;
                    for c in &conflicts {
                        let a = c.rotation_a.to_string();
                        let b = c.rotation_b.to_string();
                        w.write_record([
                            c.pilot.as_str(),
                            a.as_str(),
                            b.as_str(),
                            match c.kind {
                                ConflictKind::SameStartDate => "same_start",
                                ConflictKind::Overlap => "overlap",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
    };

    std::process::exit(code);
}

fn print_sizing(report: &SizingReport, share: &BTreeMap<ContractCategory, f64>) {
    println!("Total hours: {:.2}", report.total_hours);
    println!("Total engagement days: {:.2}", report.total_engagement_days);
    println!("Required pilots: {}", report.required_headcount);
    for (category, used) in &report.used_by_category {
        let pct = share.get(category).map_or(0.0, |s| s * 100.0);
        println!("  {category}: {used:.2} ({pct:.1}%)");
    }
    match report.productivity {
        Some(p) => println!("Productivity (hours per pilot): {p:.2}"),
        None => println!("Productivity (hours per pilot): n/a"),
    }
}

fn print_timeline(report: &PlanReport) {
    if let Some(h) = &report.horizon {
        println!("Horizon: {} → {} ({} days)", h.start, h.end, h.len_days());
    }
    for idle in &report.idle {
        let Some(slot) = report.assignment.slot(&idle.pilot_id) else {
            continue;
        };
        println!("{} | idle days: {}", slot.pilot_id, idle.idle_day_count);
        for r in &slot.rotations {
            println!("    {} → {} | {:.1} h", r.start_date, r.end_date, r.duration_hours);
        }
    }
    for r in &report.assignment.unassigned {
        println!("unassigned | {} → {}", r.start_date, r.end_date);
    }
}
