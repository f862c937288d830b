use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const SUBSTATIONS: &str = "Code poste;Nom poste;Longitude poste (DD);Latitude poste (DD)
CAIN;Cain;1;0
RAMBO;Rambo;5;6
";

const SEGMENT_HEADER: &str = "Code ligne 1;Code ligne 2;Code ligne 3;Code ligne 4;Code ligne 5;Type ouvrage;Longitude début segment (DD);Latitude début segment (DD);Longitude arrivée segment (DD);Latitude arrivée segment (DD)";

fn aerial() -> String {
    format!(
        "{SEGMENT_HEADER}
CAIN  L1RAMBO;;;;;AERIEN;1;1;5;1
CAIN  L1RAMBO;;;;;AERIEN;5;1;1;5
TEEAA L1TEEBB;;;;;AERIEN;0;0;1;1
TEEAA L1TEEBB;;;;;AERIEN;0;2;1;1
TEEAA L1TEEBB;;;;;AERIEN;2;1;1;1
"
    )
}

fn underground() -> String {
    format!(
        "{SEGMENT_HEADER}
CAIN  L1RAMBO;;;;;SOUTERRAIN;1;5;5;5
"
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn odre(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("odre").unwrap();
    cmd.env("HOME", home).env_remove("ODRE_GEO_DATA_BASE_URL");
    cmd
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn odre_help_lists_commands() {
    let tmp = tempdir().unwrap();
    odre(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("substations"))
        .stdout(predicate::str::contains("lines"))
        .stdout(predicate::str::contains("push-csv"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn odre_substations_prints_json() {
    let tmp = tempdir().unwrap();
    let csv = write(&tmp, "postes.csv", SUBSTATIONS);
    let output = odre(tmp.path())
        .args(["substations", arg(&csv)])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let substations = json.as_array().unwrap();
    assert_eq!(substations.len(), 2);
    assert_eq!(substations[0]["id"], "CAIN");
    assert_eq!(substations[0]["country"], "FR");
    assert_eq!(substations[0]["coordinate"]["lat"], 0.0);
    assert_eq!(substations[0]["coordinate"]["lon"], 1.0);
}

#[test]
fn odre_lines_writes_output_file_and_stats() {
    let tmp = tempdir().unwrap();
    let substations = write(&tmp, "postes.csv", SUBSTATIONS);
    let aerial = write(&tmp, "aeriennes.csv", &aerial());
    let underground = write(&tmp, "souterraines.csv", &underground());
    let out = tmp.path().join("lines.json");

    odre(tmp.path())
        .args([
            "lines",
            "--aerial",
            arg(&aerial),
            "--underground",
            arg(&underground),
            "--substations",
            arg(&substations),
            "-o",
            arg(&out),
            "--stats",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Reconstructed         : 1"))
        .stderr(predicate::str::contains("malformed-component"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let lines = json.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["id"], "CAIN  L1RAMBO");
    assert_eq!(line["coordinates"].as_array().unwrap().len(), 4);
    let ends = (
        line["substationStart"].as_str().unwrap(),
        line["substationEnd"].as_str().unwrap(),
    );
    assert!(ends == ("CAIN", "RAMBO") || ends == ("RAMBO", "CAIN"));
}

#[test]
fn odre_lines_fails_on_bad_coordinate() {
    let tmp = tempdir().unwrap();
    let substations = write(&tmp, "postes.csv", SUBSTATIONS);
    let aerial = write(
        &tmp,
        "aeriennes.csv",
        &format!("{SEGMENT_HEADER}\nCAIN  L1RAMBO;;;;;AERIEN;1;1;5;abc\n"),
    );
    let underground = write(&tmp, "souterraines.csv", &underground());

    odre(tmp.path())
        .args([
            "lines",
            "--aerial",
            arg(&aerial),
            "--underground",
            arg(&underground),
            "--substations",
            arg(&substations),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unparsable coordinate"));
}

#[test]
fn odre_config_sets_country() {
    let tmp = tempdir().unwrap();
    let csv = write(&tmp, "postes.csv", SUBSTATIONS);
    let config = write(&tmp, "odre.toml", "[parser]\ncountry = \"BE\"\n");

    odre(tmp.path())
        .args(["--config", arg(&config), "substations", arg(&csv)])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"country\": \"BE\""));
}

#[test]
fn odre_push_rejects_non_substation_file() {
    let tmp = tempdir().unwrap();
    let csv = write(&tmp, "aeriennes.csv", &aerial());

    odre(tmp.path())
        .args(["push-csv", "substations", arg(&csv)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("File validation failed!"))
        .stdout(predicate::str::contains("400"));
}

#[test]
fn odre_push_lines_needs_every_extract() {
    let tmp = tempdir().unwrap();
    let substations = write(&tmp, "postes.csv", SUBSTATIONS);
    let aerial = write(&tmp, "aeriennes.csv", &aerial());

    odre(tmp.path())
        .args(["push-csv", "lines", arg(&substations), arg(&aerial)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("File(s) validation failed!"));
}

#[test]
fn odre_missing_input_is_reported() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("absent.csv");
    odre(tmp.path())
        .args(["substations", arg(&missing)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.csv"));
}
