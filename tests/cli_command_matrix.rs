use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(dir: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("hera");
    cmd.current_dir(dir.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let dir = TempDir::new().expect("temp dir");

    run_help(&dir, &[]);
    run_help(&dir, &["extract"]);
    run_help(&dir, &["generate"]);
}
