#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PASSPHRASE: &str = "TTSP2026";

    fn main_cmd(dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("pdr").unwrap();
        cmd.env_remove("PDR_DATABASE_URL")
            .env_remove("PDR_LOG")
            .env("PDR_PASSPHRASE", PASSPHRASE)
            .arg(dir.path());
        cmd
    }

    // Points the record store into a directory that does not exist, so it is unreachable.
    fn offline_cmd(dir: &TempDir) -> Command {
        let mut cmd = main_cmd(dir);
        cmd.arg("--database").arg(
            dir.path()
                .join("missing-dir")
                .join("records.sqlite")
                .to_str()
                .unwrap(),
        );
        cmd
    }

    fn create_file(dir: &TempDir, path: &str, content: &str) -> PathBuf {
        let path = dir.path().join(path);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)
            .unwrap();

        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cmd_success(mut cmd: Command, cmd_name: &str, args: Vec<&str>) {
        cmd.arg(cmd_name).args(args).assert().success();
    }
    fn cmd_should_print(mut cmd: Command, cmd_name: &str, args: Vec<&str>, expected: &str) {
        cmd.arg(cmd_name)
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
    fn cmd_should_not_print(mut cmd: Command, cmd_name: &str, args: Vec<&str>, unexpected: &str) {
        cmd.arg(cmd_name)
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains(unexpected).not());
    }

    #[test]
    fn basic_record_lifecycle() {
        let dir = tempfile::tempdir().unwrap();

        cmd_should_print(
            main_cmd(&dir),
            "create",
            vec![
                "--set=ship_number=S-1021",
                "--set",
                "Department=Hull",
                "--set=issuance_date=2024-03-05",
            ],
            "Created record 1",
        );
        cmd_should_print(main_cmd(&dir), "list", vec![], "Connected to record store");
        cmd_should_print(main_cmd(&dir), "list", vec![], "S-1021");
        cmd_should_print(main_cmd(&dir), "show", vec!["1"], "03/05/2024");

        cmd_success(main_cmd(&dir), "update", vec!["1", "--set=damage=Y"]);
        cmd_should_print(
            main_cmd(&dir),
            "list",
            vec!["--damage=yes"],
            "Total Records: 1",
        );
        cmd_should_print(main_cmd(&dir), "show", vec!["1"], "Hull");

        cmd_success(main_cmd(&dir), "delete", vec!["1"]);
        cmd_should_not_print(main_cmd(&dir), "list", vec![], "S-1021");
        main_cmd(&dir).arg("delete").arg("1").assert().failure();
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        main_cmd(&dir)
            .arg("create")
            .arg("--set=colour=red")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown record field"));
        cmd_should_print(main_cmd(&dir), "list", vec![], "Total Records: 0");
    }

    #[test]
    fn offline_workspace_uses_local_mirror() {
        let dir = tempfile::tempdir().unwrap();

        cmd_should_print(
            offline_cmd(&dir),
            "create",
            vec!["--set=ship_number=S-1"],
            "Offline mode / local mirror",
        );
        cmd_should_print(
            offline_cmd(&dir),
            "create",
            vec!["--set=ship_number=S-2"],
            "Created record 2",
        );
        cmd_should_print(offline_cmd(&dir), "list", vec![], "Total Records: 2");
        cmd_should_print(offline_cmd(&dir), "list", vec!["--search=s-2"], "S-2");
    }

    #[test]
    fn reconnecting_archives_offline_edits() {
        let dir = tempfile::tempdir().unwrap();

        cmd_success(main_cmd(&dir), "create", vec!["--set=ship_number=S-live"]);
        cmd_success(offline_cmd(&dir), "create", vec!["--set=ship_number=S-offline"]);

        cmd_should_print(main_cmd(&dir), "list", vec![], "previous local data kept as");
        cmd_should_not_print(main_cmd(&dir), "list", vec![], "S-offline");
        cmd_should_print(main_cmd(&dir), "list", vec![], "S-live");
    }

    #[test]
    fn csv_import_and_analytics() {
        let dir = tempfile::tempdir().unwrap();
        let csv = create_file(
            &dir,
            "records.csv",
            "Department,Ship Number,Billing Month,Manhour Spent,Damage,Cost of Damage ¥,General Cause of Error\n\
             Hull,S-1,March,5,Y,1500,Design Miss\n\
             Machinery,S-2,January,2,N,0,\n",
        );

        cmd_should_print(
            main_cmd(&dir),
            "import",
            vec![csv.to_str().unwrap()],
            "Imported 2 records",
        );
        cmd_should_print(main_cmd(&dir), "analytics", vec![], "Total Revisions: 2");
        cmd_should_print(main_cmd(&dir), "analytics", vec![], "Design Miss");
        cmd_should_print(main_cmd(&dir), "analytics", vec![], "Unspecified");
        cmd_should_print(
            main_cmd(&dir),
            "analytics",
            vec!["--department=Hull"],
            "Total Revisions: 1",
        );
        cmd_should_print(
            main_cmd(&dir),
            "analytics",
            vec!["--json"],
            "\"monthly_manhours\"",
        );
    }

    #[test]
    fn import_expands_glob_patterns() {
        let dir = tempfile::tempdir().unwrap();
        create_file(&dir, "part-1.csv", "Ship No\nS-1\nS-2\n");
        create_file(&dir, "part-2.csv", "Ship No\nS-3\n");
        let pattern = dir.path().join("part-*.csv");

        cmd_should_print(
            main_cmd(&dir),
            "import",
            vec![pattern.to_str().unwrap()],
            "Imported 3 records",
        );
    }

    #[test]
    fn broken_import_files_import_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = create_file(&dir, "good.csv", "Ship No\nS-1\n");
        let bad = create_file(&dir, "notes.txt", "Ship No\nS-2\n");

        main_cmd(&dir)
            .arg("import")
            .arg(good.to_str().unwrap())
            .arg(bad.to_str().unwrap())
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsupported import file"));
        cmd_should_print(main_cmd(&dir), "list", vec![], "Total Records: 0");
    }

    #[test]
    fn export_then_import() {
        let dir_1 = tempfile::tempdir().unwrap();
        let dir_2 = tempfile::tempdir().unwrap();
        cmd_success(
            main_cmd(&dir_1),
            "create",
            vec!["--set=ship_number=S-7", "--set=cost_of_damage=250"],
        );
        cmd_should_print(
            main_cmd(&dir_1),
            "export",
            vec!["--out", dir_2.path().to_str().unwrap()],
            "Exported 1 records",
        );

        let exported: Vec<_> = std::fs::read_dir(dir_2.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                let name = path.file_name().unwrap().to_str().unwrap();
                name.starts_with("PDR_Export_") && name.ends_with(".xlsx")
            })
            .collect();
        assert_eq!(exported.len(), 1, "Must write exactly one export file!");

        cmd_should_print(
            main_cmd(&dir_2),
            "import",
            vec![exported[0].to_str().unwrap()],
            "Imported 1 records",
        );
        cmd_should_print(main_cmd(&dir_2), "list", vec![], "S-7");
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        main_cmd(&dir)
            .env("PDR_PASSPHRASE", "guess")
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("access denied"));
    }

    #[test]
    fn theme_preference() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = Command::cargo_bin("pdr").unwrap();
        cmd.env_remove("PDR_PASSPHRASE").arg(dir.path());
        cmd_should_print(cmd, "theme", vec![], "Current theme: aurora");

        let mut cmd = Command::cargo_bin("pdr").unwrap();
        cmd.env_remove("PDR_PASSPHRASE").arg(dir.path());
        cmd_success(cmd, "theme", vec!["frost"]);

        cmd_should_print(main_cmd(&dir), "theme", vec![], "Current theme: frost");
    }
}
