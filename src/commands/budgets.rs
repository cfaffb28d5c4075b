// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{aggregate, Sign};
use crate::budget::{evaluate, BudgetReport};
use crate::store;
use crate::utils::{as_of, fmt_opt_percent, format_currency, maybe_print_json, pretty_table};
use crate::window::{Granularity, TimeWindow};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Evaluate the saved profile against this month's spending.
pub fn month_report(conn: &Connection, today: NaiveDate) -> Result<BudgetReport> {
    let profile = store::profile_or_default(conn)?;
    let window = TimeWindow::new(today, Granularity::Month);
    let transactions = super::fetch_or_empty("transactions", store::list_transactions(conn, None));
    let actuals = aggregate(&transactions, window.start, Sign::Expense);
    tracing::debug!(start = %window.start, categories = actuals.len(), "budget actuals");
    Ok(evaluate(&profile, &actuals))
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = as_of(sub)?;
    let report = month_report(conn, today)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let ccy = store::profile_or_default(conn)?.currency;
    let ccy = ccy.as_str();
    let rows = report
        .lines
        .iter()
        .map(|l| {
            vec![
                format!("{} {}", l.category.icon(), l.category.label()),
                format_currency(l.budget_amount, ccy),
                fmt_opt_percent(l.budget_percentage),
                format_currency(l.actual_amount, ccy),
                format_currency(l.remaining, ccy),
                format!("{}%", l.used_percent),
                if l.over_budget { "OVER".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "% income", "Spent", "Remaining", "Used", ""],
            rows
        )
    );
    println!(
        "Total budget {} | available after savings {} | spent {}",
        format_currency(report.total_budget, ccy),
        format_currency(report.available_for_budget, ccy),
        format_currency(report.total_actual, ccy)
    );
    if report.budget_exceeded {
        println!("Budget exceeds income after savings; adjust allocations or the savings rate.");
    } else if let Some(h) = report.headroom_percent {
        println!("{}% under budget for the month", h);
    }
    let over = report.over_budget_categories();
    if !over.is_empty() {
        let names: Vec<&str> = over.iter().map(|c| c.label()).collect();
        println!("Over budget: {}", names.join(", "));
    }
    Ok(())
}
