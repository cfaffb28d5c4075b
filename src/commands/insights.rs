// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::{count_new, InsightFilter};
use crate::models::{FinancialInsight, InsightStatus};
use crate::store;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("implement", sub)) => transition(conn, sub, InsightStatus::Implemented)?,
        Some(("dismiss", sub)) => transition(conn, sub, InsightStatus::Dismissed)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            store::delete_insight(conn, id)?;
            println!("Deleted insight #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").context("--title is required")?;
    let content = sub
        .get_one::<String>("content")
        .context("--content is required")?;
    let date_generated = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let insight = store::insert_insight(
        conn,
        &FinancialInsight {
            id: 0,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            category: sub
                .get_one::<String>("category")
                .map(String::as_str)
                .unwrap_or("general")
                .parse()?,
            priority_level: sub
                .get_one::<String>("priority")
                .map(String::as_str)
                .unwrap_or("medium")
                .parse()?,
            date_generated,
            status: InsightStatus::New,
        },
    )?;
    println!("Added insight #{} '{}'", insight.id, insight.title);
    Ok(())
}

fn parse_filter<T: std::str::FromStr<Err = crate::error::Error>>(
    sub: &clap::ArgMatches,
    id: &str,
) -> Result<Option<T>> {
    Ok(sub
        .get_one::<String>(id)
        .filter(|s| s.as_str() != "all")
        .map(|s| s.parse::<T>())
        .transpose()?)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = InsightFilter {
        status: parse_filter(sub, "status")?,
        category: parse_filter(sub, "category")?,
        priority: parse_filter(sub, "priority")?,
    };

    let insights = super::fetch_or_empty("insights", store::list_insights(conn, None));
    let shown = filter.apply(&insights);
    if maybe_print_json(json_flag, jsonl_flag, &shown)? {
        return Ok(());
    }
    let rows = shown
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                i.date_generated.to_string(),
                i.priority_level.to_string(),
                i.category.to_string(),
                i.status.to_string(),
                i.title.clone(),
                i.content.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Priority", "Category", "Status", "Title", "Content"],
            rows
        )
    );
    println!("{} new", count_new(&insights));
    Ok(())
}

fn transition(conn: &Connection, sub: &clap::ArgMatches, to: InsightStatus) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let insight = store::set_insight_status(conn, id, to).inspect_err(|e| {
        tracing::warn!(id, error = %e, "insight status change rejected");
    })?;
    println!("Insight #{} is now {}", insight.id, insight.status);
    Ok(())
}
