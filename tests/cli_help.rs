use std::process::Command;

#[test]
fn test_help_lists_subcommands() {
    let bin = env!("CARGO_BIN_EXE_deployment-sync");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "plan", "ledger", "init"] {
        assert!(
            stdout.contains(command),
            "help output should list `{}`; got:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn test_run_help_mentions_strict() {
    let bin = env!("CARGO_BIN_EXE_deployment-sync");

    let output = Command::new(bin).args(["run", "--help"]).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--strict"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let bin = env!("CARGO_BIN_EXE_deployment-sync");

    let output = Command::new(bin).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
}
