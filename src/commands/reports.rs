// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{aggregate, category_breakdown, category_transactions, CategoryShare, Sign};
use crate::dashboard;
use crate::models::{icon_for, Category};
use crate::store;
use crate::utils::{as_of, format_currency, maybe_print_json, pretty_table, sum_sat};
use crate::window::{Granularity, TimeWindow};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("overview", sub)) => overview(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct SpendReport {
    window: TimeWindow,
    label: String,
    total: rust_decimal::Decimal,
    categories: Vec<CategoryShare>,
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let range: Granularity = sub
        .get_one::<String>("range")
        .map(String::as_str)
        .unwrap_or("month")
        .parse()?;
    let window = TimeWindow::new(as_of(sub)?, range);
    let transactions = super::fetch_or_empty("transactions", store::list_transactions(conn, None));
    let ccy = store::profile_or_default(conn)?.currency;
    let ccy = ccy.as_str();

    if let Some(category) = sub.get_one::<String>("category") {
        let rows = category_transactions(&transactions, window.start, category.trim());
        if maybe_print_json(json_flag, jsonl_flag, &rows)? {
            return Ok(());
        }
        let data = rows
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    format_currency(t.amount.abs(), ccy),
                    t.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{} {} spending, {}",
            icon_for(category),
            Category::display_for(category).label(),
            window.label()
        );
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Notes"], data)
        );
        return Ok(());
    }

    let totals = aggregate(&transactions, window.start, Sign::Expense);
    let report = SpendReport {
        window,
        label: window.label(),
        total: sum_sat(totals.values().copied()),
        categories: category_breakdown(&totals),
    };
    if json_flag {
        maybe_print_json(true, false, &report)?;
        return Ok(());
    }
    if maybe_print_json(false, jsonl_flag, &report.categories)? {
        return Ok(());
    }
    if report.categories.is_empty() {
        println!("No expenses recorded for {}", report.label);
        return Ok(());
    }
    let data = report
        .categories
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", icon_for(&c.category), c.category),
                format_currency(c.amount, ccy),
                format!("{}%", c.share_percent),
            ]
        })
        .collect();
    println!("Spending by category, {}", report.label);
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share"], data)
    );
    println!("Total {}", format_currency(report.total, ccy));
    Ok(())
}

fn overview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = as_of(sub)?;
    let profile = store::profile_or_default(conn)?;
    let transactions = super::fetch_or_empty("transactions", store::list_transactions(conn, None));
    let goals = super::fetch_or_empty("goals", store::list_goals(conn));
    let insights = super::fetch_or_empty("insights", store::list_insights(conn, None));

    let view = dashboard::overview(&profile, &transactions, &goals, &insights, today);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    let ccy = profile.currency.as_str();
    println!("Overview for {}", view.period);
    println!(
        "{}",
        pretty_table(
            &["Measure", "Value"],
            vec![
                vec!["Monthly income".into(), format_currency(view.monthly_income, ccy)],
                vec![
                    "Expenses this month".into(),
                    format!(
                        "{} ({}% of income)",
                        format_currency(view.monthly_expenses, ccy),
                        view.expense_share_percent
                    ),
                ],
                vec![
                    "Savings target".into(),
                    format!(
                        "{} ({}%)",
                        format_currency(view.savings_amount, ccy),
                        view.savings_rate
                    ),
                ],
                vec!["Remaining".into(), format_currency(view.remaining_budget, ccy)],
                vec![
                    "Income received".into(),
                    format!(
                        "{} ({}%)",
                        format_currency(view.income_actual, ccy),
                        view.income_progress_percent
                    ),
                ],
                vec!["New insights".into(), view.new_insights.to_string()],
            ],
        )
    );

    if !view.top_goals.is_empty() {
        let goals = view
            .top_goals
            .iter()
            .map(|g| {
                vec![
                    g.title.clone(),
                    format!(
                        "{} of {}",
                        format_currency(g.current_amount, ccy),
                        format_currency(g.target_amount, ccy)
                    ),
                    format!("{:.0}%", g.progress_percent()),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Saved", "Progress"], goals));
    }
    if !view.recent_transactions.is_empty() {
        let recent = view
            .recent_transactions
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    format!("{} {}", icon_for(&t.category), t.category_key()),
                    format_currency(t.amount, ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], recent)
        );
    }
    Ok(())
}
