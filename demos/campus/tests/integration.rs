use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn run_bin(args: &[&str]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_campus"));
    Command::new(bin).args(args).output().expect("failed to execute campus")
}

fn run_ok(args: &[&str]) -> String {
    let output = run_bin(args);
    let stdout = String::from_utf8(output.stdout).expect("stdout is not utf-8");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "campus {args:?} failed\nstdout:\n{stdout}\nstderr:\n{stderr}\n"
    );
    stdout
}

fn read_csv(path: &Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).expect("open csv");
    rdr.records().map(|r| r.expect("csv record")).collect()
}

#[test]
fn synthetic_run_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap();
    let stdout = run_ok(&["--ticks", "6", "--workers", "2", "--out", out, "--quiet"]);

    assert!(stdout.contains("Ticks run           = 6"), "{stdout}");
    let summaries = read_csv(&dir.path().join("tick_summaries.csv"));
    assert_eq!(summaries.len(), 7);
    let population = &summaries[0][2];
    assert!(summaries.iter().all(|r| &r[2] == population));
}

#[test]
fn csv_run_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config_path = dir.path().join("run.toml");
    let config = format!(
        "[sim]\nsimulation_length = 12\nseed = 4\n\n\
         [input]\nsource = \"csv\"\ndir = {data:?}\nbuilding_count = 3\nmove_rule_period = 2\n\n\
         [weather]\nsource = \"schedule\"\nfile = {weather:?}\n\n\
         [output]\ndir = \"out\"\nbuilding_interval = 4\n",
        weather = data.join("weather.csv"),
    );
    std::fs::write(&config_path, config).unwrap();

    let stdout = run_ok(&["--config", config_path.to_str().unwrap()]);
    assert!(stdout.contains("----------------- T12 cloudy"), "{stdout}");
    assert!(stdout.contains("Total people  = 220"));

    // Ticks 0, 4, 8, 12 over 3 buildings.
    let buildings = read_csv(&dir.path().join("out").join("building_states.csv"));
    assert_eq!(buildings.len(), 12);
}

#[test]
fn worker_count_does_not_change_results() {
    let runs: Vec<Vec<csv::StringRecord>> = ["1", "3"]
        .iter()
        .map(|workers| {
            let dir = tempfile::tempdir().unwrap();
            run_ok(&["--ticks", "10", "--seed", "11", "--workers", workers, "--out", dir.path().to_str().unwrap(), "--quiet"]);
            read_csv(&dir.path().join("tick_summaries.csv"))
        })
        .collect();
    assert!(!runs[0].is_empty());
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bad.toml");
    std::fs::write(
        &config_path,
        "[sim]\nsimulation_length = 3\nseed = 1\n[input]\nsource = \"synthetic\"\nbuildings = 0\n",
    )
    .unwrap();

    let output = run_bin(&["--config", config_path.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn zero_workers_fails() {
    let output = run_bin(&["--ticks", "1", "--workers", "0", "--quiet"]);
    assert!(!output.status.success());
}
