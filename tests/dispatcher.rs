use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const BIN: &str = env!("CARGO_BIN_EXE_cmdalias");
const ALIASES_FILE_VAR: &str = "GoAliasesFile";

fn make_unique_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = env::temp_dir().join(format!(
        "cmdalias_dispatcher_{}_{}_{}",
        label,
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

#[test]
fn reports_unset_variable_on_stdout_and_exits_zero() {
    let output = Command::new(BIN)
        .env_remove(ALIASES_FILE_VAR)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No GoAliasesFile environment variable set"
    );
}

#[test]
fn treats_empty_variable_as_unset() {
    let output = Command::new(BIN)
        .env(ALIASES_FILE_VAR, "")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No GoAliasesFile environment variable set"
    );
}

#[test]
fn exits_one_when_no_alias_matches() {
    let dir = make_unique_temp_dir("no_match");
    let path = dir.join("aliases");
    fs::write(&path, "foo=bar\n").unwrap();

    // argv[0] is the binary's full path here, which no entry maps.
    let output = Command::new(BIN)
        .env(ALIASES_FILE_VAR, &path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout)
        .starts_with("Alias not found for executable:"));

    fs::remove_dir_all(&dir).unwrap();
}

#[cfg(unix)]
fn write_script(dir: &PathBuf, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join(name);
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn dispatches_via_invoking_name_and_forwards_args() {
    use std::os::unix::process::CommandExt;

    let dir = make_unique_temp_dir("dispatch");
    let out = dir.join("out");
    let script = write_script(
        &dir,
        "greet.sh",
        &format!("printf '%s' \"$*\" > {}", out.display()),
    );

    let path = dir.join("aliases");
    fs::write(&path, format!("greet={}\n", script.display())).unwrap();

    let output = Command::new(BIN)
        .arg0("greet")
        .args(["x", "y"])
        .env(ALIASES_FILE_VAR, &path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&out).unwrap(), "x y");

    fs::remove_dir_all(&dir).unwrap();
}

#[cfg(unix)]
#[test]
fn exits_zero_when_child_fails() {
    use std::os::unix::process::CommandExt;

    let dir = make_unique_temp_dir("child_fails");
    let script = write_script(&dir, "broken.sh", "exit 7");

    let path = dir.join("aliases");
    fs::write(&path, format!("broken={}\n", script.display())).unwrap();

    let output = Command::new(BIN)
        .arg0("broken")
        .env(ALIASES_FILE_VAR, &path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));

    fs::remove_dir_all(&dir).unwrap();
}
