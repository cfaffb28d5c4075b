// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finflow::dashboard::overview;
use finflow::error::Error;
use finflow::models::{
    BudgetType, Category, CurrencyCode, FinancialGoal, FinancialInsight, GoalCategory, GoalStatus,
    InsightCategory, InsightStatus, PriorityLevel, Transaction, UserProfile,
};
use finflow::utils::format_currency;
use finflow::{cli, commands::profile, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["finflow", "profile"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("profile", sub)) = matches.subcommand() else {
        panic!("no profile subcommand");
    };
    profile::handle(conn, sub)
}

#[test]
fn missing_profile_degrades_to_defaults() {
    let conn = setup();
    assert!(matches!(store::load_profile(&conn), Err(Error::NotAuthenticated)));
    let p = store::profile_or_default(&conn).unwrap();
    assert_eq!(p, UserProfile::default());
    assert_eq!(p.savings_rate, d("15"));
    assert_eq!(p.allocation(Category::Housing), d("30"));
}

#[test]
fn set_and_allocate_persist() {
    let conn = setup();
    run(&conn, &["set", "--income", "5200", "--currency", "eur", "--budget-type", "absolute"]).unwrap();
    run(&conn, &["allocate", "--category", "food", "--value", "600"]).unwrap();

    let p = store::load_profile(&conn).unwrap();
    assert_eq!(p.monthly_income, d("5200"));
    assert_eq!(p.currency, CurrencyCode::Eur);
    assert_eq!(p.budget_type, BudgetType::Absolute);
    assert_eq!(p.allocation(Category::Food), d("600"));
    assert_eq!(p.allocation(Category::Debt), d("5"));
}

#[test]
fn invalid_profile_not_saved() {
    let conn = setup();
    let err = run(&conn, &["set", "--savings-rate", "140"]).unwrap_err();
    let err = err.downcast_ref::<Error>().unwrap();
    assert_eq!(err.field_errors()[0].field, "savings_rate");
    assert!(matches!(store::load_profile(&conn), Err(Error::NotAuthenticated)));

    assert!(run(&conn, &["allocate", "--category", "income", "--value", "10"]).is_err());
}

#[test]
fn currency_formatting() {
    assert_eq!(format_currency(d("1234.5"), "USD"), "$1,234.50");
    assert_eq!(format_currency(d("-1234567.891"), "EUR"), "-€1,234,567.89");
    assert_eq!(format_currency(d("0.004"), "GBP"), "£0.00");
    assert_eq!(format_currency(d("-0.001"), "INR"), "₹0.00");
    assert_eq!(format_currency(d("999"), "XYZ"), "$999.00");
    assert_eq!(
        format_currency(Decimal::MAX, "USD"),
        "$79,228,162,514,264,337,593,543,950,335.00"
    );
}

#[test]
fn overview_for_current_month() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let day = |m, dd| NaiveDate::from_ymd_opt(2026, m, dd).unwrap();
    let p = UserProfile {
        monthly_income: d("4000"),
        savings_rate: d("20"),
        ..UserProfile::default()
    };
    let txs: Vec<Transaction> = [
        (day(10, 15), "food", "-200"),
        (day(10, 10), "income", "-50"),
        (day(10, 1), "income", "2000"),
        (day(9, 30), "housing", "-1500"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (date, category, amount))| Transaction {
        id: i as i64 + 1,
        date,
        description: category.into(),
        category: category.into(),
        amount: d(amount),
        payment_method: None,
        notes: None,
    })
    .collect();
    let goals = vec![FinancialGoal {
        id: 1,
        title: "Trip".into(),
        category: GoalCategory::Travel,
        target_amount: d("1000"),
        current_amount: d("250"),
        deadline: None,
        status: GoalStatus::InProgress,
        notes: None,
    }];
    let insights = vec![FinancialInsight {
        id: 1,
        title: "t".into(),
        content: "c".into(),
        category: InsightCategory::General,
        priority_level: PriorityLevel::Low,
        date_generated: today,
        status: InsightStatus::New,
    }];

    let v = overview(&p, &txs, &goals, &insights, today);
    assert_eq!(v.period, "October 2026");
    assert_eq!(v.monthly_expenses, d("250"));
    assert_eq!(v.remaining_budget, d("3750"));
    assert_eq!(v.savings_amount, d("800"));
    assert_eq!(v.income_actual, d("2000"));
    assert_eq!(v.income_progress_percent, d("50"));
    assert_eq!(v.new_insights, 1);
    assert_eq!(v.top_goals.len(), 1);
    assert_eq!(v.recent_transactions.len(), 4);
}

#[test]
fn overview_with_no_income_is_zero_not_nan() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let v = overview(&UserProfile::default(), &[], &[], &[], today);
    assert_eq!(v.expense_share_percent, Decimal::ZERO);
    assert_eq!(v.income_progress_percent, Decimal::ZERO);
    assert!(v.top_goals.is_empty());
}

#[test]
fn failed_allocation_rolls_back_whole_profile() {
    let conn = setup();
    conn.execute_batch(
        "CREATE TRIGGER reject_debt BEFORE INSERT ON allocations
         WHEN NEW.category = 'debt'
         BEGIN SELECT RAISE(ABORT, 'debt allocations locked'); END;",
    )
    .unwrap();
    let mut p = UserProfile {
        monthly_income: d("3000"),
        ..UserProfile::default()
    };
    p.allocations.insert(Category::Housing, d("35"));
    p.allocations.insert(Category::Debt, d("10"));

    assert!(matches!(store::save_profile(&conn, &p), Err(Error::Database(_))));
    assert!(matches!(store::load_profile(&conn), Err(Error::NotAuthenticated)));
    let saved: i64 = conn
        .query_row("SELECT COUNT(*) FROM allocations", [], |r| r.get(0))
        .unwrap();
    assert_eq!(saved, 0);
}

#[test]
fn overview_with_extreme_income_saturates() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let p = UserProfile {
        monthly_income: Decimal::MAX,
        savings_rate: d("100"),
        ..UserProfile::default()
    };
    let spent = Transaction {
        id: 1,
        date: today,
        description: "Refund reversal".into(),
        category: "other".into(),
        amount: Decimal::MIN,
        payment_method: None,
        notes: None,
    };
    let v = overview(&p, &[spent], &[], &[], today);
    assert!(v.savings_amount > Decimal::ZERO);
    assert_eq!(v.monthly_expenses, Decimal::MAX);
    assert_eq!(v.remaining_budget, Decimal::ZERO);
    assert_eq!(v.expense_share_percent, d("100"));
}
