// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finflow::commands::exporter::{self, ExportFormat};
use finflow::models::{PaymentMethod, Transaction};
use finflow::{cli, db, store};
use rusqlite::Connection;
use tempfile::tempdir;

fn tx(description: &str, notes: Option<&str>) -> Transaction {
    Transaction {
        id: 1,
        date: NaiveDate::from_ymd_opt(2026, 10, 4).unwrap(),
        description: description.into(),
        category: "food".into(),
        amount: "-12.5".parse().unwrap(),
        payment_method: Some(PaymentMethod::Cash),
        notes: notes.map(String::from),
    }
}

#[test]
fn csv_header_and_quoting() {
    let mut buf = Vec::new();
    exporter::write_transactions_csv(
        &mut buf,
        &[tx("Lunch, with \"Sam\"", Some("line one\nline two")), tx("Plain", None)],
    )
    .unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Description,Category,Amount,Payment Method,Notes"
    );
    assert!(text.contains("2026-10-04,\"Lunch, with \"\"Sam\"\"\",food,-12.50,cash,\"line one\nline two\""));
    assert!(text.ends_with("2026-10-04,Plain,food,-12.50,cash,\n"));
}

#[test]
fn csv_round_trips_through_reader() {
    let mut buf = Vec::new();
    let tricky = "a,b \"c\"\nd";
    exporter::write_transactions_csv(&mut buf, &[tx(tricky, None)]).unwrap();
    let mut rdr = csv::Reader::from_reader(buf.as_slice());
    let rec = rdr.records().next().unwrap().unwrap();
    assert_eq!(&rec[1], tricky);
}

#[test]
fn unknown_format_rejected_before_writing() {
    assert!("XML".parse::<ExportFormat>().is_err());
    assert_eq!(" CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);

    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let matches = cli::build_cli().get_matches_from([
        "finflow",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        out.to_str().unwrap(),
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    assert!(exporter::handle(&conn, sub).is_err());
    assert!(!out.exists());
}

#[test]
fn export_json_applies_filters() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    store::insert_transaction(&conn, &tx("Lunch", None)).unwrap();
    let mut rent = tx("Rent", Some("October"));
    rent.category = "housing".into();
    store::insert_transaction(&conn, &rent).unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let matches = cli::build_cli().get_matches_from([
        "finflow",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
        "--category",
        "housing",
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["description"], "Rent");
    assert_eq!(arr[0]["amount"], "-12.50");
    assert_eq!(arr[0]["notes"], "October");
}
