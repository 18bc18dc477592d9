use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn fincal(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fincal_cli").expect("binary");
    cmd.env("FINCAL_CLI_SCRIPT", "1")
        .env("FINCAL_HOME", home.path())
        .env("FINCAL_TODAY", "2024-03-15")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_adds_and_renders_a_month() {
    let home = TempDir::new().expect("tempdir");
    let input = "add 2024-01-31 Rent 100 monthly\n\
                 add 2024-03-01 \"Side gig\" 250 income\n\
                 show 2024-03\n\
                 balance 2024-03-31\n\
                 exit\n";
    fincal(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added transaction"))
        .stdout(contains("March 2024"))
        .stdout(contains("Side gig"))
        .stdout(contains("Balance on 2024-03-31: 1050.00"));

    let saved = std::fs::read_to_string(home.path().join("data").join("transactions.json"))
        .expect("transactions persisted");
    assert!(saved.contains("\"monthly\""));
}

#[test]
fn state_survives_between_runs() {
    let home = TempDir::new().expect("tempdir");
    fincal(&home)
        .write_stdin("starting 200\nadd 2024-03-10 Books 40\n")
        .assert()
        .success();
    fincal(&home)
        .write_stdin("day 2024-03-10\nstarting\n")
        .assert()
        .success()
        .stdout(contains("Books"))
        .stdout(contains("Balance: 160.00"))
        .stdout(contains("Starting balance: 200.00"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = TempDir::new().expect("tempdir");
    fincal(&home)
        .write_stdin("shwo\nlist\n")
        .assert()
        .success()
        .stdout(contains("Suggestion: `show`?"))
        .stdout(contains("No transactions yet"));
}

#[test]
fn invalid_input_reports_and_keeps_going() {
    let home = TempDir::new().expect("tempdir");
    fincal(&home)
        .write_stdin("add 2024-01-01 Gift 0\ntoday\n")
        .assert()
        .success()
        .stderr(contains("amount must be greater than zero"))
        .stdout(contains("March 2024"))
        .stdout(contains("|[15]"))
        .stdout(contains("Added transaction").not());
}

#[test]
fn oversized_amounts_are_rejected_and_stored_ones_do_not_abort() {
    let home = TempDir::new().expect("tempdir");
    fincal(&home)
        .write_stdin("add 2024-01-01 Jackpot 79228162514264337593543950335 income weekly\nshow 2024-03\n")
        .assert()
        .success()
        .stderr(contains("exceeds the limit"))
        .stdout(contains("March 2024"))
        .stdout(contains("Added transaction").not());

    let data = home.path().join("data");
    std::fs::create_dir_all(&data).expect("data dir");
    std::fs::write(
        data.join("transactions.json"),
        r#"[{
            "id": "5f1d7c1e-8a4b-4c1e-9a57-2f8e0c3b7d10",
            "anchor_date": "2024-01-01",
            "description": "Jackpot",
            "amount": "79228162514264337593543950335",
            "recurrence": "weekly"
        }]"#,
    )
    .expect("seed transactions");
    fincal(&home)
        .write_stdin("today\nbalance 2024-03-31\n")
        .assert()
        .success()
        .stderr(contains("exceeds the limit"))
        .stdout(contains("March 2024"))
        .stdout(contains("Balance on 2024-03-31: 79228162514264337593543950335"));
}
