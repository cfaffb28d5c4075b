// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::goals::{rank, summarize, time_remaining, top_goals};
use crate::models::{FinancialGoal, GoalCategory, GoalStatus};
use crate::store;
use crate::utils::{as_of, format_currency, maybe_print_json, parse_date, pretty_table};
use crate::validate::{self, GoalInput};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("complete", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            store::set_goal_status(conn, id, GoalStatus::Completed)?;
            println!("Goal #{} marked completed", id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            store::delete_goal(conn, id)?;
            println!("Deleted goal #{}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> &'a str {
    sub.get_one::<String>(id).map(String::as_str).unwrap_or("")
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let valid = validate::goal(&GoalInput {
        title: arg(sub, "title"),
        target_amount: arg(sub, "target"),
        current_amount: arg(sub, "current"),
    })?;
    let goal = store::insert_goal(
        conn,
        &FinancialGoal {
            id: 0,
            title: valid.title,
            category: arg(sub, "category").parse()?,
            target_amount: valid.target_amount,
            current_amount: valid.current_amount,
            deadline: sub
                .get_one::<String>("deadline")
                .map(|s| parse_date(s))
                .transpose()?,
            status: arg(sub, "status").parse()?,
            notes: sub.get_one::<String>("notes").cloned(),
        },
    )?;
    println!("Added goal #{} '{}'", goal.id, goal.title);
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let mut goal = store::get_goal(conn, id)?;

    let title = sub
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| goal.title.clone());
    let target = sub
        .get_one::<String>("target")
        .cloned()
        .unwrap_or_else(|| goal.target_amount.to_string());
    let current = sub
        .get_one::<String>("current")
        .cloned()
        .unwrap_or_else(|| goal.current_amount.to_string());
    let valid = validate::goal(&GoalInput {
        title: &title,
        target_amount: &target,
        current_amount: &current,
    })?;
    goal.title = valid.title;
    goal.target_amount = valid.target_amount;
    goal.current_amount = valid.current_amount;

    if let Some(c) = sub.get_one::<String>("category") {
        goal.category = c.parse::<GoalCategory>()?;
    }
    if let Some(d) = sub.get_one::<String>("deadline") {
        goal.deadline = Some(parse_date(d)?);
    }
    if let Some(s) = sub.get_one::<String>("status") {
        goal.status = s.parse::<GoalStatus>()?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        goal.notes = Some(n.clone());
    }
    store::update_goal(conn, &goal)?;
    println!("Updated goal #{}", id);
    Ok(())
}

fn goal_rows(goals: &[&FinancialGoal], ccy: &str, today: NaiveDate) -> Vec<Vec<String>> {
    goals
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                g.title.clone(),
                g.category.to_string(),
                g.status.to_string(),
                format!(
                    "{} of {}",
                    format_currency(g.current_amount, ccy),
                    format_currency(g.target_amount, ccy)
                ),
                format!("{:.0}%", g.progress_percent()),
                time_remaining(g.deadline, today),
            ]
        })
        .collect()
}

const GOAL_HEADERS: [&str; 7] = ["ID", "Title", "Category", "Status", "Saved", "Progress", "Time left"];

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let status = sub
        .get_one::<String>("status")
        .filter(|s| s.as_str() != "all")
        .map(|s| s.parse::<GoalStatus>())
        .transpose()?;

    let goals = super::fetch_or_empty("goals", store::list_goals(conn));
    let shown: Vec<&FinancialGoal> = goals
        .iter()
        .filter(|g| status.is_none_or(|s| g.status == s))
        .collect();
    if maybe_print_json(json_flag, jsonl_flag, &shown)? {
        return Ok(());
    }

    let ccy = store::profile_or_default(conn)?.currency;
    let today = chrono::Local::now().date_naive();
    println!(
        "{}",
        pretty_table(&GOAL_HEADERS, goal_rows(&shown, ccy.as_str(), today))
    );
    let s = summarize(&goals);
    println!(
        "Saved {} of {} ({}%) | {} in progress, {} completed",
        format_currency(s.total_current, ccy.as_str()),
        format_currency(s.total_target, ccy.as_str()),
        s.overall_percent,
        s.in_progress,
        s.completed
    );
    Ok(())
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(3);
    let today = as_of(sub)?;

    let goals = super::fetch_or_empty("goals", store::list_goals(conn));
    let ranked = if limit == 0 {
        rank(&goals)
    } else {
        top_goals(&goals, limit)
    };
    if maybe_print_json(json_flag, jsonl_flag, &ranked)? {
        return Ok(());
    }
    if ranked.is_empty() {
        println!("No financial goals set yet");
        return Ok(());
    }
    let ccy = store::profile_or_default(conn)?.currency;
    println!(
        "{}",
        pretty_table(&GOAL_HEADERS, goal_rows(&ranked, ccy.as_str(), today))
    );
    Ok(())
}
