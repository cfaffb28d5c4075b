// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::budget_percentage;
use crate::models::{Category, UserProfile};
use crate::store;
use crate::utils::{fmt_opt_percent, format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("allocate", sub)) => allocate(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let p = store::profile_or_default(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        return Ok(());
    }
    let ccy = p.currency.as_str();
    println!(
        "{}",
        pretty_table(
            &["Setting", "Value"],
            vec![
                vec!["Monthly income".into(), format_currency(p.monthly_income, ccy)],
                vec!["Savings rate".into(), format!("{}%", p.savings_rate)],
                vec!["Currency".into(), ccy.to_string()],
                vec!["Budget type".into(), p.budget_type.to_string()],
                vec!["Literacy".into(), p.financial_literacy_level.to_string()],
                vec!["Risk tolerance".into(), p.risk_tolerance.to_string()],
            ],
        )
    );
    let rows = Category::EXPENSE
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.icon(), c.label()),
                p.allocation(*c).to_string(),
                fmt_opt_percent(budget_percentage(&p, *c)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Allocation", "% of income"], rows)
    );
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut p: UserProfile = store::profile_or_default(conn)?;
    if let Some(v) = sub.get_one::<String>("income") {
        p.monthly_income = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("savings-rate") {
        p.savings_rate = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("currency") {
        p.currency = v.to_uppercase().parse()?;
    }
    if let Some(v) = sub.get_one::<String>("budget-type") {
        p.budget_type = v.to_lowercase().parse()?;
    }
    if let Some(v) = sub.get_one::<String>("literacy") {
        p.financial_literacy_level = v.to_lowercase().parse()?;
    }
    if let Some(v) = sub.get_one::<String>("risk") {
        p.risk_tolerance = v.to_lowercase().parse()?;
    }
    store::save_profile(conn, &p)?;
    println!("Profile saved");
    Ok(())
}

fn allocate(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = sub
        .get_one::<String>("category")
        .context("--category is required")?
        .to_lowercase()
        .parse()?;
    if category == Category::Income {
        anyhow::bail!("Income is not a budget category");
    }
    let value = parse_decimal(sub.get_one::<String>("value").context("--value is required")?)?;
    let mut p = store::profile_or_default(conn)?;
    p.allocations.insert(category, value);
    store::save_profile(conn, &p)?;
    println!("Allocation for {} set to {} ({})", category, value, p.budget_type);
    Ok(())
}
