// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::str::FromStr;

use crate::error::Error;
use crate::models::Transaction;
use anyhow::{Context, Result};
use rusqlite::Connection;

use super::transactions::{query_rows, TransactionRow};

pub const CSV_HEADER: [&str; 6] = [
    "Date",
    "Description",
    "Category",
    "Amount",
    "Payment Method",
    "Notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::InvalidData(format!(
                "Unknown format: {} (use csv|json)",
                other
            ))),
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Write transactions as CSV. Fields containing commas, quotes or line
/// breaks are quoted, with embedded quotes doubled.
pub fn write_transactions_csv<W: Write>(w: W, transactions: &[Transaction]) -> crate::Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(CSV_HEADER)?;
    for t in transactions {
        let row = TransactionRow::from(t);
        wtr.write_record([
            row.date,
            row.description,
            row.category,
            row.amount,
            row.payment_method,
            row.notes,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_transactions_json<W: Write>(
    mut w: W,
    transactions: &[Transaction],
) -> crate::Result<()> {
    let rows: Vec<TransactionRow> = transactions.iter().map(TransactionRow::from).collect();
    serde_json::to_writer_pretty(&mut w, &rows)?;
    writeln!(w)?;
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt: ExportFormat = sub
        .get_one::<String>("format")
        .context("--format is required")?
        .parse()?;
    let out = sub.get_one::<String>("out").context("--out is required")?;

    let rows = query_rows(conn, sub)?;
    let file = std::fs::File::create(out).with_context(|| format!("Cannot create {}", out))?;
    match fmt {
        ExportFormat::Csv => write_transactions_csv(file, &rows)?,
        ExportFormat::Json => write_transactions_json(file, &rows)?,
    }
    tracing::debug!(count = rows.len(), path = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
