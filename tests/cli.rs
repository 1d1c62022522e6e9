#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("rotations.csv"),
        "start_date,end_date,duration_hours,engagement_days\n\
         2025-06-01,2025-06-04,20,4\n\
         2025-06-01,2025-06-03,15,3\n\
         2025-06-02,2025-06-06,25,5\n\
         2025-06-05,2025-06-07,12,3\n",
    )
    .unwrap();
    fs::write(
        dir.join("policies.csv"),
        "category,working_days_per_month,existing_headcount\n\
         Resident,26,1\n\
         Contracted,22,0\n",
    )
    .unwrap();
}

fn cli() -> Command {
    Command::cargo_bin("equipage-cli").unwrap()
}

#[test]
fn size_prints_required_pilots() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    cli()
        .current_dir(dir.path())
        .args(["size", "--rotations", "rotations.csv", "--policies", "policies.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Required pilots: 1"));
}

#[test]
fn plan_then_show_and_check() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    // un seul pilote : deux rotations démarrent le 1er juin → code 2
    cli()
        .current_dir(dir.path())
        .args([
            "plan",
            "--rotations",
            "rotations.csv",
            "--policies",
            "policies.csv",
            "--seed",
            "3",
            "--out-idle",
            "idle.csv",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 unassigned"));

    assert!(dir.path().join("plan.json").exists());
    let idle = fs::read_to_string(dir.path().join("idle.csv")).unwrap();
    assert!(idle.starts_with("pilot_id,idle_days"));
    assert!(idle.contains("Pilot_Resident_1"));

    cli()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pilot_Resident_1 | idle days:"));

    // la règle « même date de début » laisse passer des chevauchements
    cli()
        .current_dir(dir.path())
        .args(["check", "--report", "conflicts.csv"])
        .assert()
        .code(2);
    let report = fs::read_to_string(dir.path().join("conflicts.csv")).unwrap();
    assert!(report.contains("overlap"));
}

#[test]
fn full_overlap_plan_passes_check() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());

    // certaines rotations restent sans pilote, mais aucun chevauchement
    cli()
        .current_dir(dir.path())
        .args([
            "plan",
            "--rotations",
            "rotations.csv",
            "--policies",
            "policies.csv",
            "--seed",
            "3",
            "--collision",
            "full-overlap",
        ])
        .assert()
        .code(2);

    cli()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn same_primary_and_secondary_is_rejected() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    cli()
        .current_dir(dir.path())
        .args([
            "size",
            "--rotations",
            "rotations.csv",
            "--policies",
            "policies.csv",
            "--primary",
            "resident",
            "--secondary",
            "resident",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));
}

#[test]
fn missing_category_fails() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(
        dir.path().join("policies.csv"),
        "category,working_days_per_month,existing_headcount\nResident,26,1\n",
    )
    .unwrap();
    cli()
        .current_dir(dir.path())
        .args(["size", "--rotations", "rotations.csv", "--policies", "policies.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contracted"));
}
