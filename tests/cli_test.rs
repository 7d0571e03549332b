use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_cli_json_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("txquery"));
    cmd.arg("tests/fixtures/transactions.json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"transaction_count\": 5"))
        .stdout(predicate::str::contains("\"total_amount\": \"1730.86\""))
        .stdout(predicate::str::contains("\"max_amount\": \"985.0\""))
        .stdout(predicate::str::contains("\"unique_clients\": 7"))
        .stdout(predicate::str::contains("\"top_sender\": \"Arthur Shelby\""))
        .stdout(predicate::str::contains("\"transactions_by_beneficiary\""))
        .stdout(predicate::str::contains(
            "\"beneficiary_full_name\": \"Aberama Gold\"",
        ));

    Ok(())
}

#[test]
fn test_cli_csv_merges_issue_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("txquery"));
    cmd.arg("tests/fixtures/transactions.csv");

    cmd.assert()
        .success()
        // Two rows for mtn 663458 collapse into one transaction.
        .stdout(predicate::str::contains("\"transaction_count\": 3"))
        .stdout(predicate::str::contains("\"total_amount\": \"648.2\""))
        .stdout(predicate::str::contains("\"unique_clients\": 5"));

    Ok(())
}

#[test]
fn test_cli_sender_and_client_lookups() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("txquery"));
    cmd.arg("tests/fixtures/transactions.json")
        .arg("--sender")
        .arg("Tom Shelby")
        .arg("--client")
        .arg("Aunt Polly");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total_sent_by\""))
        .stdout(predicate::str::contains("\"total_amount\": \"678.06\""))
        .stdout(predicate::str::contains("\"open_issues\": false"));

    Ok(())
}

#[test]
fn test_cli_rejects_malformed_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.json");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "{{ not json")?;

    let mut cmd = Command::new(cargo_bin!("txquery"));
    cmd.arg(&path);
    cmd.assert().failure();

    Ok(())
}

#[test]
fn test_cli_rejects_negative_amount() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("negative.json");
    std::fs::write(
        &path,
        r#"[{"mtn": "1", "amount": -1.0, "senderFullName": "Tom Shelby", "senderAge": 22,
            "beneficiaryFullName": "Alfie Solomons", "beneficiaryAge": 33}]"#,
    )?;

    let mut cmd = Command::new(cargo_bin!("txquery"));
    cmd.arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("negative amount"));

    Ok(())
}
