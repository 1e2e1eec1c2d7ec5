//! CLI integration tests
//!
//! Tests for the paramsync command-line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn paramsync() -> Command {
    Command::cargo_bin("paramsync").unwrap()
}

/// Write a state file into the temp dir and return its path
fn write_state(temp: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = temp.path().join("params.json");
    fs::write(&path, contents).unwrap();
    path
}

const START_DATE_STATE: &str = r#"[{"name":"start_date","type":"text","value":null,"options":"","multiValuesOptions":null}]"#;

mod scan_command {
    use super::*;

    #[test]
    fn scan_single_file_lists_valid_placeholders() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("query.sql");
        fs::write(&file_path, "select * from t where d > {{ start_date }}").unwrap();

        paramsync()
            .arg("scan")
            .arg(&file_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("start_date"));
    }

    #[test]
    fn scan_invalid_token_exits_with_code_1() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("query.sql");
        fs::write(&file_path, "select {{ bad name }} from t").unwrap();

        paramsync()
            .arg("scan")
            .arg(&file_path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a valid parameter name"));
    }

    #[test]
    fn scan_invalid_report_names_the_line() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("query.sql");
        fs::write(&file_path, "select 1\nfrom t where x = {{ ab }}").unwrap();

        paramsync()
            .arg("scan")
            .arg(&file_path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("line 2"));
    }

    #[test]
    fn scan_from_stdin() {
        paramsync()
            .arg("scan")
            .arg("-")
            .write_stdin("select {{ user_id }} from t")
            .assert()
            .success()
            .stdout(predicate::str::contains("user_id"));
    }

    #[test]
    fn scan_directory_recursive() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("models");
        fs::create_dir(&subdir).unwrap();
        fs::write(temp.path().join("root.sql"), "select {{ root_param }}").unwrap();
        fs::write(subdir.join("model.sql"), "select {{ model_param }}").unwrap();

        paramsync()
            .arg("scan")
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("root_param"))
            .stdout(predicate::str::contains("model_param"));
    }

    #[test]
    fn scan_clean_file_exits_0() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("query.sql");
        fs::write(&file_path, "select 1 from dual").unwrap();

        paramsync().arg("scan").arg(&file_path).assert().success();
    }
}

mod sync_command {
    use super::*;

    #[test]
    fn sync_adds_newly_discovered_parameter() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, START_DATE_STATE);
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select * from t where d > {{ start_date }} and {{ end_date }}").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg(&sql)
            .assert()
            .success()
            .stdout(predicate::str::contains("end_date"))
            .stdout(predicate::str::contains("start_date"));
    }

    #[test]
    fn sync_removes_dropped_parameter() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, START_DATE_STATE);
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select 1 from dual").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg(&sql)
            .assert()
            .success()
            .stdout(predicate::str::contains("start_date").not());
    }

    #[test]
    fn sync_write_updates_the_state_file() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, START_DATE_STATE);
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select {{ end_date }}").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg("--write")
            .arg(&sql)
            .assert()
            .success();

        let updated = fs::read_to_string(&state).unwrap();
        assert!(updated.contains("end_date"));
        assert!(!updated.contains("start_date"));
    }

    #[test]
    fn sync_from_stdin() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, START_DATE_STATE);

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg("-")
            .write_stdin("select {{ start_date }}, {{ user_id }}")
            .assert()
            .success()
            .stdout(predicate::str::contains("user_id"));
    }

    #[test]
    fn sync_invalid_token_exits_with_code_1() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, "[]");
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select {{ bad name }}").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg(&sql)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a valid parameter name"));
    }

    #[test]
    fn sync_over_limit_reports_and_exits_1() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, "[]");
        let sql = temp.path().join("query.sql");
        let placeholders: String = (0..11)
            .map(|i| format!("{{{{ param_{:02}x }}}}", i))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(&sql, format!("select {}", placeholders)).unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg(&sql)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("up to 10 query parameters"));
    }

    #[test]
    fn sync_malformed_state_exits_with_code_2() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, "definitely not json");
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select 1").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(&state)
            .arg(&sql)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("malformed parameter list"));
    }

    #[test]
    fn sync_missing_state_file_exits_with_code_2() {
        let temp = TempDir::new().unwrap();
        let sql = temp.path().join("query.sql");
        fs::write(&sql, "select 1").unwrap();

        paramsync()
            .arg("sync")
            .arg("--params")
            .arg(temp.path().join("missing.json"))
            .arg(&sql)
            .assert()
            .code(2);
    }
}

mod context_command {
    use super::*;

    #[test]
    fn context_renders_the_payload() {
        let temp = TempDir::new().unwrap();
        let state = write_state(
            &temp,
            "[{\"name\":\"env_name\",\"type\":\"dropdown\",\"value\":[\"a\",\"b\"],\"options\":\"a\\nb\\nc\",\"multiValuesOptions\":{\"prefix\":\"'\",\"suffix\":\"'\",\"separator\":\",\"}}]",
        );

        paramsync()
            .arg("context")
            .arg("--params")
            .arg(&state)
            .assert()
            .success()
            .stdout(predicate::str::contains("'a','b'"));
    }

    #[test]
    fn context_preserves_null_values() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, START_DATE_STATE);

        paramsync()
            .arg("context")
            .arg("--params")
            .arg(&state)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"start_date\": null"));
    }

    #[test]
    fn context_malformed_state_exits_with_code_2() {
        let temp = TempDir::new().unwrap();
        let state = write_state(&temp, "{oops");

        paramsync()
            .arg("context")
            .arg("--params")
            .arg(&state)
            .assert()
            .code(2);
    }
}

mod cli_options {
    use super::*;

    #[test]
    fn help_flag() {
        paramsync()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("paramsync"))
            .stdout(predicate::str::contains("scan"))
            .stdout(predicate::str::contains("sync"));
    }

    #[test]
    fn version_flag() {
        paramsync()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("paramsync"));
    }

    #[test]
    fn scan_requires_a_file_argument() {
        paramsync().arg("scan").assert().failure();
    }

    #[test]
    fn sync_requires_a_state_file() {
        paramsync().arg("sync").arg("query.sql").assert().failure();
    }
}
