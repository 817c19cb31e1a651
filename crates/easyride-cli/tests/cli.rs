use std::fs;
use std::path::Path;

use assert_cmd::Command;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from any user configuration file.
fn easyride(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("easyride").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn setup() -> (TempDir, TempDir) {
    (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap())
}

/// Single-page PDF with one text line per entry.
fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![50.into(), 700.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-24).into()]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

fn write_receipt(dir: &Path, name: &str, amount: &str, date: &str) {
    let date_line = format!("Travel date {}", date);
    let amount_line = format!("Total amount chargedCHF {}VAT 8.1%", amount);
    let pdf = build_pdf(&["EasyRide purchase receipt", date_line.as_str(), amount_line.as_str()]);
    fs::write(dir.join(name), pdf).unwrap();
}

/// Monday, Saturday and Wednesday rides in March 2024.
fn receipts_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_receipt(dir.path(), "a.pdf", "10.00", "04.03.2024");
    write_receipt(dir.path(), "b.pdf", "25.50", "09.03.2024");
    write_receipt(dir.path(), "c.pdf", "999999.99", "06.03.2024");
    dir
}

#[test]
fn sums_generated_receipts() {
    let (home, _) = setup();
    let receipts = receipts_dir();

    easyride(home.path())
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 1000035.49 (3 entries)\n");
}

#[test]
fn max_amount_drops_large_receipt() {
    let (home, _) = setup();
    let receipts = receipts_dir();

    easyride(home.path())
        .args(["--max", "100.00", "--path"])
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 35.50 (2 entries)\n");
}

#[test]
fn weekdays_only_drops_saturday_receipt() {
    let (home, _) = setup();
    let receipts = receipts_dir();

    easyride(home.path())
        .args(["--weekdays-only", "--end", "2024-12-31", "--path"])
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 1000009.99 (2 entries)\n");
}

#[test]
fn date_range_limits_receipts() {
    let (home, _) = setup();
    let receipts = receipts_dir();

    easyride(home.path())
        .args(["--start", "2024-03-05", "--end", "2024-03-08", "--path"])
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 999999.99 (1 entries)\n");
}

#[test]
fn export_lists_generated_receipts() {
    let (home, _) = setup();
    let receipts = receipts_dir();
    let export = home.path().join("receipts.csv");

    easyride(home.path())
        .args(["--max", "100.00", "--path"])
        .arg(receipts.path())
        .arg("--export")
        .arg(&export)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&export).unwrap(),
        "file,amount,ride_date,included,reason\n\
         a.pdf,10.00,2024-03-04,yes,\n\
         b.pdf,25.50,2024-03-09,yes,\n\
         c.pdf,999999.99,2024-03-06,no,above maximum amount\n"
    );
}

#[test]
fn empty_directory_prints_zero_total() {
    let (home, receipts) = setup();

    easyride(home.path())
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 0.00 (0 entries)\n");
}

#[test]
fn unreadable_receipt_is_skipped() {
    let (home, receipts) = setup();
    fs::write(receipts.path().join("garbage.pdf"), "not a pdf at all").unwrap();
    fs::write(receipts.path().join("notes.txt"), "ignored").unwrap();

    easyride(home.path())
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: CHF 0.00 (0 entries)\n")
        .stderr(predicate::str::contains("Skipping").and(predicate::str::contains("garbage.pdf")))
        .stderr(predicate::str::contains("notes.txt").not());
}

#[test]
fn info_level_logs_scan_progress() {
    let (home, receipts) = setup();

    easyride(home.path())
        .args(["--loglevel", "info", "--path"])
        .arg(receipts.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Searching for files in path"));
}

#[test]
fn missing_directory_fails() {
    let (home, receipts) = setup();

    easyride(home.path())
        .arg("--path")
        .arg(receipts.path().join("absent"))
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn incomplete_language_config_fails_before_scanning() {
    let (home, receipts) = setup();
    let config = home.path().join("config.json");
    fs::write(
        &config,
        r#"{
            "languages": {
                "default": "EN",
                "supported": ["EN", "DE"],
                "patterns": {
                    "EN": {
                        "amount": "Total amount charged\\s*CHF\\s*(.+?)\\s*VAT",
                        "date": "Travel date\\s*(\\d{2}\\.\\d{2}\\.\\d{4})",
                        "date_format": "%d.%m.%Y"
                    },
                    "DE": { "amount": "Betrag\\s*(.+?)\\s*MWST", "date_format": "%d.%m.%Y" }
                }
            }
        }"#,
    )
    .unwrap();
    fs::write(receipts.path().join("garbage.pdf"), "not a pdf").unwrap();

    easyride(home.path())
        .arg("--config")
        .arg(&config)
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("language DE is missing its date pattern"))
        .stderr(predicate::str::contains("Skipping").not());
}

#[test]
fn unknown_language_fails() {
    let (home, receipts) = setup();

    easyride(home.path())
        .args(["--language", "FR", "--path"])
        .arg(receipts.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language FR"));
}

#[test]
fn invalid_amount_bound_is_a_usage_error() {
    let (home, receipts) = setup();

    easyride(home.path())
        .args(["--max", "lots", "--path"])
        .arg(receipts.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max"));
}

#[test]
fn diagnostics_run_instead_of_scan() {
    let (home, receipts) = setup();

    easyride(home.path())
        .arg("--diag")
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sample receipt (EN)"))
        .stdout(predicate::str::contains("Total sum").not());
}

#[test]
fn export_writes_csv_header() {
    let (home, receipts) = setup();
    let export = home.path().join("receipts.csv");

    easyride(home.path())
        .arg("--path")
        .arg(receipts.path())
        .arg("--export")
        .arg(&export)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&export).unwrap(),
        "file,amount,ride_date,included,reason\n"
    );
}

#[test]
fn config_init_then_check() {
    let (home, _receipts) = setup();
    let config = home.path().join("easyride.json");

    easyride(home.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    easyride(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EN (default EN)"));
}

#[test]
fn config_set_currency_changes_summary() {
    let (home, receipts) = setup();
    let config = home.path().join("easyride.json");

    easyride(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "receipts.currency", "EUR"])
        .assert()
        .success();

    easyride(home.path())
        .arg("--config")
        .arg(&config)
        .arg("--path")
        .arg(receipts.path())
        .assert()
        .success()
        .stdout("Total sum: EUR 0.00 (0 entries)\n");
}
