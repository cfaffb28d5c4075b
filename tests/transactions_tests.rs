// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finflow::error::Error;
use finflow::models::{PaymentMethod, Transaction};
use finflow::validate::{self, TransactionInput};
use finflow::{cli, commands::transactions, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        ("2026-10-01", "Salary", "income", "3000", None),
        ("2026-10-03", "Groceries", "food", "-82.40", Some("weekly shop")),
        ("2026-10-05", "Rent", "housing", "-1200", None),
        ("2026-10-07", "Bus pass", "transportation", "-45", Some("GROCERY run too")),
    ];
    for (date, description, category, amount, notes) in rows {
        store::insert_transaction(
            &conn,
            &Transaction {
                id: 0,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                description: description.into(),
                category: category.into(),
                amount: amount.parse().unwrap(),
                payment_method: Some(PaymentMethod::DebitCard),
                notes: notes.map(String::from),
            },
        )
        .unwrap();
    }
    conn
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<Transaction> {
    let mut argv = vec!["finflow", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Bus pass");
}

#[test]
fn search_matches_description_and_notes() {
    let conn = setup();
    let rows = list_rows(&conn, &["--search", "grocer"]);
    let names: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Bus pass", "Groceries"]);
}

#[test]
fn search_is_literal() {
    let conn = setup();
    assert!(list_rows(&conn, &["--search", "r.nt"]).is_empty());
}

#[test]
fn type_category_and_range_filters() {
    let conn = setup();
    assert_eq!(list_rows(&conn, &["--type", "income"]).len(), 1);
    assert_eq!(list_rows(&conn, &["--type", "expense"]).len(), 3);
    assert_eq!(list_rows(&conn, &["--category", "housing"]).len(), 1);

    let rows = list_rows(&conn, &["--from", "2026-10-03", "--to", "2026-10-05"]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn sort_by_size() {
    let conn = setup();
    let rows = list_rows(&conn, &["--sort", "highest"]);
    assert_eq!(rows[0].description, "Salary");
    let rows = list_rows(&conn, &["--sort", "lowest", "--type", "expense"]);
    assert_eq!(rows[0].description, "Bus pass");
}

#[test]
fn add_via_cli_validates() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "finflow", "tx", "add", "--date", "2026-10-09", "-d", "Cinema", "--amount", "-18.5",
        "--category", "entertainment", "--payment-method", "credit_card",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, sub).unwrap();
    let newest = &store::list_transactions(&conn, Some(1)).unwrap()[0];
    assert_eq!(newest.description, "Cinema");
    assert_eq!(newest.amount, "-18.5".parse::<Decimal>().unwrap());
    assert_eq!(newest.payment_method, Some(PaymentMethod::CreditCard));
}

#[test]
fn transaction_validation_reports_every_field() {
    let err = validate::transaction(&TransactionInput {
        date: "10/09/2026",
        description: "",
        amount: "0",
        category: "gadgets",
    })
    .unwrap_err();
    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field).collect();
    assert_eq!(fields, vec!["date", "description", "amount", "category"]);

    let ok = validate::transaction(&TransactionInput {
        date: "2026-10-09",
        description: " Coffee ",
        amount: "-3.20",
        category: "food",
    })
    .unwrap();
    assert_eq!(ok.description, "Coffee");
}

#[test]
fn missing_rows_are_not_found() {
    let conn = setup();
    assert!(matches!(
        store::delete_transaction(&conn, 42),
        Err(Error::NotFound(_))
    ));
}
