// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::cash_flow;
use crate::ledger::TransactionQuery;
use crate::models::{Category, PaymentMethod, Transaction};
use crate::store;
use crate::utils::{format_currency, maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::validate::{self, TransactionInput};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_payment_method(sub: &clap::ArgMatches) -> Result<Option<PaymentMethod>> {
    sub.get_one::<String>("payment-method")
        .map(|s| s.parse::<PaymentMethod>())
        .transpose()
        .map_err(Into::into)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let valid = validate::transaction(&TransactionInput {
        date: sub.get_one::<String>("date").map(String::as_str).unwrap_or(""),
        description: sub
            .get_one::<String>("description")
            .map(String::as_str)
            .unwrap_or(""),
        amount: sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""),
        category: sub
            .get_one::<String>("category")
            .map(String::as_str)
            .unwrap_or(""),
    })?;
    let t = store::insert_transaction(
        conn,
        &Transaction {
            id: 0,
            date: valid.date,
            description: valid.description,
            category: valid.category.as_str().to_string(),
            amount: valid.amount,
            payment_method: opt_payment_method(sub)?,
            notes: sub.get_one::<String>("notes").cloned(),
        },
    )?;
    println!(
        "Recorded #{} {} on {} '{}' ({})",
        t.id, t.amount, t.date, t.description, t.category
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let mut t = store::get_transaction(conn, id)?;
    if let Some(d) = sub.get_one::<String>("date") {
        t.date = parse_date(d)?;
    }
    if let Some(d) = sub.get_one::<String>("description") {
        t.description = d.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        t.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        t.category = c.parse::<Category>()?.as_str().to_string();
    }
    if sub.contains_id("payment-method") {
        t.payment_method = opt_payment_method(sub)?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        t.notes = Some(n.clone()).filter(|n| !n.is_empty());
    }
    // Re-check the edited row with the same rules as a new one.
    validate::transaction(&TransactionInput {
        date: &t.date.to_string(),
        description: &t.description,
        amount: &t.amount.to_string(),
        category: t.category.as_str(),
    })?;
    store::update_transaction(conn, &t)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    store::delete_transaction(conn, id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

/// Build the list/export query from the shared filter flags.
pub fn query_from_args(sub: &clap::ArgMatches) -> Result<TransactionQuery> {
    let mut q = TransactionQuery::default();
    q.search = sub.get_one::<String>("search").cloned();
    if let Some(k) = sub.get_one::<String>("type") {
        q.kind = k.to_lowercase().parse()?;
    }
    q.category = sub
        .get_one::<String>("category")
        .map(|c| c.trim().to_string())
        .filter(|c| c != "all");
    q.from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    q.to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if let Some(s) = sub.get_one::<String>("sort") {
        q.sort = s.to_lowercase().parse()?;
    }
    q.limit = sub.get_one::<usize>("limit").copied();
    Ok(q)
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub payment_method: String,
    pub notes: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            amount: format!("{:.2}", t.amount),
            payment_method: t
                .payment_method
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            notes: t.notes.clone().unwrap_or_default(),
        }
    }
}

/// Fetch every transaction and apply the command-line filters.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let query = query_from_args(sub)?;
    let all = super::fetch_or_empty("transactions", store::list_transactions(conn, None));
    Ok(query.apply(&all)?.into_iter().cloned().collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    let rows: Vec<TransactionRow> = data.iter().map(TransactionRow::from).collect();
    if maybe_print_json(json_flag, jsonl_flag, &rows)? {
        return Ok(());
    }

    let ccy = store::profile_or_default(conn)?.currency;
    let table_rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date,
                r.description,
                format!("{} {}", crate::models::icon_for(&r.category), r.category),
                r.amount,
                r.payment_method,
                r.notes,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Description", "Category", "Amount", "Payment", "Notes"],
            table_rows,
        )
    );
    let flow = cash_flow(&data);
    println!(
        "Income {}  Expenses {}  Net {}",
        format_currency(flow.income, ccy.as_str()),
        format_currency(flow.expenses, ccy.as_str()),
        format_currency(flow.net, ccy.as_str())
    );
    Ok(())
}
