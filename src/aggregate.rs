// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category roll-ups over an already-fetched transaction list.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;
use crate::utils::{percent_of, round_cents, sum_sat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `amount < 0`, excluding anything filed under `income`.
    Expense,
    /// `amount > 0`.
    Income,
}

impl Sign {
    fn matches(&self, t: &Transaction) -> bool {
        match self {
            Sign::Expense => t.amount < Decimal::ZERO && t.category_key() != "income",
            Sign::Income => t.amount > Decimal::ZERO,
        }
    }
}

/// Per-category totals (absolute values, cent-rounded) of the transactions
/// dated on or after `start` that match `sign`.
pub fn aggregate(
    transactions: &[Transaction],
    start: NaiveDate,
    sign: Sign,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.date >= start && sign.matches(t))
    {
        let total = totals
            .entry(t.category_key().to_string())
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.amount.abs());
    }
    for v in totals.values_mut() {
        *v = round_cents(*v);
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Share of the grand total, one decimal place.
    pub share_percent: Decimal,
}

/// Largest category first, with each category's share of the total.
pub fn category_breakdown(totals: &BTreeMap<String, Decimal>) -> Vec<CategoryShare> {
    let grand = sum_sat(totals.values().copied());
    let mut rows: Vec<CategoryShare> = totals
        .iter()
        .map(|(category, amount)| CategoryShare {
            category: category.clone(),
            amount: *amount,
            share_percent: percent_of(*amount, grand).round_dp(1),
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}

/// Expense transactions of one category inside the window, newest first.
pub fn category_transactions<'a>(
    transactions: &'a [Transaction],
    start: NaiveDate,
    category: &str,
) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start && Sign::Expense.matches(t) && t.category_key() == category)
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CashFlow {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Income (positive amounts), expenses (absolute negative amounts) and their difference.
pub fn cash_flow<'a, I>(transactions: I) -> CashFlow
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut flow = CashFlow::default();
    for t in transactions {
        if t.amount > Decimal::ZERO {
            flow.income = flow.income.saturating_add(t.amount);
        } else if t.amount < Decimal::ZERO {
            flow.expenses = flow.expenses.saturating_add(t.amount.abs());
        }
    }
    flow.net = flow.income.saturating_sub(flow.expenses);
    flow
}
