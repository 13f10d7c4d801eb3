use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("wardair").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn predict_reads_a_csv_series() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("history.csv");
    std::fs::write(
        &csv_path,
        "date,aqi\n\
         2024-01-01,100\n\
         2024-01-02,110\n\
         2024-01-03,120\n\
         2024-01-04,125\n\
         2024-01-05,130\n\
         2024-01-06,135\n\
         2024-01-07,140\n",
    )
    .expect("write csv");

    let mut cmd = Command::cargo_bin("wardair").expect("binary exists");
    let assert = cmd
        .args(["predict", "--ward-id", "W001", "--csv"])
        .arg(&csv_path)
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(output.contains("\"INCREASING\""));
    assert!(output.contains("\"dataPoints\": 7"));
}
