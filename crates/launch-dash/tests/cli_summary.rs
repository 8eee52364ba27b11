mod common;

use std::process::Command;

use expect_test::expect;

use common::{temp_dir, write_file};

const SAMPLE: &str = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,0,0,v1.0
CCAFS LC-40,1,2500,v1.1
CCAFS LC-40,1,3100,FT
KSC LC-39A,1,2490,FT
KSC LC-39A,0,5300,FT
VAFB SLC-4E,0,9600,B4
";

fn launch_dash() -> Command {
    Command::new(env!("CARGO_BIN_EXE_launch-dash"))
}

#[test]
fn summary_prints_both_tables_and_exits() {
    let root = temp_dir("cli-summary");
    let data = root.join("launches.csv");
    write_file(&data, SAMPLE);

    let output = launch_dash()
        .current_dir(&root)
        .arg("--data")
        .arg(&data)
        .arg("summary")
        .output()
        .expect("run launch-dash summary");
    assert!(
        output.status.success(),
        "summary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    expect![[r#"
        Launch Site  count
        CCAFS LC-40      3
        KSC LC-39A       2
        VAFB SLC-4E      1

        class  Launch Site  count
        1      CCAFS LC-40      2
        0      CCAFS LC-40      1
        0      KSC LC-39A       1
        0      VAFB SLC-4E      1
        1      KSC LC-39A       1
    "#]]
    .assert_eq(&stdout);
}

#[test]
fn missing_dataset_exits_with_status_one() {
    let root = temp_dir("cli-missing");
    let data = root.join("missing.csv");

    let output = launch_dash()
        .current_dir(&root)
        .arg("--data")
        .arg(&data)
        .arg("summary")
        .output()
        .expect("run launch-dash");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load dataset"), "stderr: {stderr}");
    assert!(stderr.contains("missing.csv"), "stderr: {stderr}");
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "piped stderr must not carry color codes");
}

#[test]
fn invalid_listen_override_is_rejected_before_loading() {
    let root = temp_dir("cli-listen");
    let data = root.join("launches.csv");
    write_file(&data, SAMPLE);

    let output = launch_dash()
        .current_dir(&root)
        .arg("--data")
        .arg(&data)
        .arg("--listen")
        .arg("localhost")
        .arg("summary")
        .output()
        .expect("run launch-dash");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid web.listen"), "stderr: {stderr}");
}
