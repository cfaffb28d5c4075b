// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entity store: list/create/update/delete for transactions, goals and
//! insights, plus the single user profile.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    Category, FinancialGoal, FinancialInsight, GoalStatus, InsightStatus, Transaction,
    UserProfile,
};

fn decimal_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn limit_clause(limit: Option<usize>) -> String {
    limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default()
}

fn expect_changed(changed: usize, what: &str, id: i64) -> Result<()> {
    if changed == 0 {
        Err(Error::NotFound(format!("{} {}", what, id)))
    } else {
        Ok(())
    }
}

// --- transactions ---

const TX_COLS: &str = "id, date, description, category, amount, payment_method, notes";

fn tx_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get(1)?,
        description: r.get(2)?,
        category: r.get(3)?,
        amount: decimal_col(r, 4)?,
        payment_method: r.get(5)?,
        notes: r.get(6)?,
    })
}

/// Transactions newest first.
pub fn list_transactions(conn: &Connection, limit: Option<usize>) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions ORDER BY date DESC, id DESC{}",
        TX_COLS,
        limit_clause(limit)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], tx_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    debug!(count = out.len(), "listed transactions");
    Ok(out)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let sql = format!("SELECT {} FROM transactions WHERE id=?1", TX_COLS);
    conn.query_row(&sql, params![id], tx_from_row)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
}

/// Store a new transaction; the `id` field of `t` is ignored.
pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(date, description, category, amount, payment_method, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.date,
            t.description,
            t.category,
            t.amount.to_string(),
            t.payment_method,
            t.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, "inserted transaction");
    Ok(Transaction { id, ..t.clone() })
}

pub fn update_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    let changed = conn.execute(
        "UPDATE transactions SET date=?1, description=?2, category=?3, amount=?4,
         payment_method=?5, notes=?6 WHERE id=?7",
        params![
            t.date,
            t.description,
            t.category,
            t.amount.to_string(),
            t.payment_method,
            t.notes,
            t.id
        ],
    )?;
    expect_changed(changed, "transaction", t.id)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    expect_changed(changed, "transaction", id)
}

// --- goals ---

const GOAL_COLS: &str =
    "id, title, category, target_amount, current_amount, deadline, status, notes";

fn goal_from_row(r: &Row<'_>) -> rusqlite::Result<FinancialGoal> {
    Ok(FinancialGoal {
        id: r.get(0)?,
        title: r.get(1)?,
        category: r.get(2)?,
        target_amount: decimal_col(r, 3)?,
        current_amount: decimal_col(r, 4)?,
        deadline: r.get(5)?,
        status: r.get(6)?,
        notes: r.get(7)?,
    })
}

/// Goals, most recently created first.
pub fn list_goals(conn: &Connection) -> Result<Vec<FinancialGoal>> {
    let sql = format!("SELECT {} FROM goals ORDER BY id DESC", GOAL_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], goal_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_goal(conn: &Connection, id: i64) -> Result<FinancialGoal> {
    let sql = format!("SELECT {} FROM goals WHERE id=?1", GOAL_COLS);
    conn.query_row(&sql, params![id], goal_from_row)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("goal {}", id)))
}

pub fn insert_goal(conn: &Connection, g: &FinancialGoal) -> Result<FinancialGoal> {
    conn.execute(
        "INSERT INTO goals(title, category, target_amount, current_amount, deadline, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            g.title,
            g.category,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.deadline,
            g.status,
            g.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, "inserted goal");
    Ok(FinancialGoal { id, ..g.clone() })
}

pub fn update_goal(conn: &Connection, g: &FinancialGoal) -> Result<()> {
    let changed = conn.execute(
        "UPDATE goals SET title=?1, category=?2, target_amount=?3, current_amount=?4,
         deadline=?5, status=?6, notes=?7 WHERE id=?8",
        params![
            g.title,
            g.category,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.deadline,
            g.status,
            g.notes,
            g.id
        ],
    )?;
    expect_changed(changed, "goal", g.id)
}

pub fn set_goal_status(conn: &Connection, id: i64, status: GoalStatus) -> Result<()> {
    let changed = conn.execute(
        "UPDATE goals SET status=?1 WHERE id=?2",
        params![status, id],
    )?;
    expect_changed(changed, "goal", id)
}

pub fn delete_goal(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    expect_changed(changed, "goal", id)
}

// --- insights ---

const INSIGHT_COLS: &str = "id, title, content, category, priority_level, date_generated, status";

fn insight_from_row(r: &Row<'_>) -> rusqlite::Result<FinancialInsight> {
    Ok(FinancialInsight {
        id: r.get(0)?,
        title: r.get(1)?,
        content: r.get(2)?,
        category: r.get(3)?,
        priority_level: r.get(4)?,
        date_generated: r.get(5)?,
        status: r.get(6)?,
    })
}

/// Insights, newest first.
pub fn list_insights(conn: &Connection, limit: Option<usize>) -> Result<Vec<FinancialInsight>> {
    let sql = format!(
        "SELECT {} FROM insights ORDER BY date_generated DESC, id DESC{}",
        INSIGHT_COLS,
        limit_clause(limit)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], insight_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_insight(conn: &Connection, id: i64) -> Result<FinancialInsight> {
    let sql = format!("SELECT {} FROM insights WHERE id=?1", INSIGHT_COLS);
    conn.query_row(&sql, params![id], insight_from_row)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("insight {}", id)))
}

pub fn insert_insight(conn: &Connection, i: &FinancialInsight) -> Result<FinancialInsight> {
    conn.execute(
        "INSERT INTO insights(title, content, category, priority_level, date_generated, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            i.title,
            i.content,
            i.category,
            i.priority_level,
            i.date_generated,
            i.status
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, "inserted insight");
    Ok(FinancialInsight { id, ..i.clone() })
}

/// Move an insight to `to`, enforcing the lifecycle.
pub fn set_insight_status(
    conn: &Connection,
    id: i64,
    to: InsightStatus,
) -> Result<FinancialInsight> {
    let mut insight = get_insight(conn, id)?;
    insight.status = insight.status.transition(to)?;
    conn.execute(
        "UPDATE insights SET status=?1 WHERE id=?2",
        params![insight.status, id],
    )?;
    debug!(id, status = %insight.status, "insight status changed");
    Ok(insight)
}

pub fn delete_insight(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM insights WHERE id=?1", params![id])?;
    expect_changed(changed, "insight", id)
}

// --- profile ---

/// The saved profile, or `NotAuthenticated` when none has been saved yet.
pub fn load_profile(conn: &Connection) -> Result<UserProfile> {
    let base = conn
        .query_row(
            "SELECT monthly_income, savings_rate, currency, budget_type,
                    financial_literacy_level, risk_tolerance
             FROM profile WHERE id=1",
            [],
            |r| {
                Ok(UserProfile {
                    monthly_income: decimal_col(r, 0)?,
                    savings_rate: decimal_col(r, 1)?,
                    currency: r.get(2)?,
                    budget_type: r.get(3)?,
                    financial_literacy_level: r.get(4)?,
                    risk_tolerance: r.get(5)?,
                    ..UserProfile::default()
                })
            },
        )
        .optional()?;
    let mut profile = base.ok_or(Error::NotAuthenticated)?;

    let mut stmt = conn.prepare("SELECT category, value FROM allocations")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, Category>(0)?, decimal_col(r, 1)?)))?;
    for row in rows {
        let (category, value) = row?;
        profile.allocations.insert(category, value);
    }
    Ok(profile)
}

/// Profile for rendering: the saved one, or defaults when nothing is saved.
pub fn profile_or_default(conn: &Connection) -> Result<UserProfile> {
    match load_profile(conn) {
        Err(Error::NotAuthenticated) => {
            tracing::warn!("no saved profile; using defaults");
            Ok(UserProfile::default())
        }
        other => other,
    }
}

pub fn save_profile(conn: &Connection, p: &UserProfile) -> Result<()> {
    crate::validate::profile(p)?;
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO profile(id, monthly_income, savings_rate, currency, budget_type,
                             financial_literacy_level, risk_tolerance)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            monthly_income=excluded.monthly_income,
            savings_rate=excluded.savings_rate,
            currency=excluded.currency,
            budget_type=excluded.budget_type,
            financial_literacy_level=excluded.financial_literacy_level,
            risk_tolerance=excluded.risk_tolerance",
        params![
            p.monthly_income.to_string(),
            p.savings_rate.to_string(),
            p.currency,
            p.budget_type,
            p.financial_literacy_level,
            p.risk_tolerance
        ],
    )?;
    for (category, value) in &p.allocations {
        tx.execute(
            "INSERT INTO allocations(category, value) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET value=excluded.value",
            params![category, value.to_string()],
        )?;
    }
    tx.commit()?;
    debug!("profile saved");
    Ok(())
}
