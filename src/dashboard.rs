// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-to-date overview assembled from fetched entities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::cash_flow;
use crate::goals::{top_goals, DEFAULT_DISPLAY_LIMIT};
use crate::insights::count_new;
use crate::models::{FinancialGoal, FinancialInsight, Transaction, UserProfile};
use crate::utils::{percent_of, round_cents};
use crate::window::{Granularity, TimeWindow};

pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub period: String,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub expense_share_percent: Decimal,
    pub savings_rate: Decimal,
    pub savings_amount: Decimal,
    pub remaining_budget: Decimal,
    pub income_actual: Decimal,
    pub income_progress_percent: Decimal,
    pub new_insights: usize,
    pub top_goals: Vec<FinancialGoal>,
    pub recent_transactions: Vec<Transaction>,
}

/// Build the overview for the month containing `today`.
///
/// `transactions` is expected newest first, as the store lists them.
pub fn overview(
    profile: &UserProfile,
    transactions: &[Transaction],
    goals: &[FinancialGoal],
    insights: &[FinancialInsight],
    today: NaiveDate,
) -> Overview {
    let window = TimeWindow::new(today, Granularity::Month);
    let month = cash_flow(transactions.iter().filter(|t| window.contains(t.date)));
    let income = profile.monthly_income;

    Overview {
        period: window.label(),
        monthly_income: round_cents(income),
        monthly_expenses: round_cents(month.expenses),
        expense_share_percent: percent_of(month.expenses, income).round_dp(0),
        savings_rate: profile.savings_rate,
        savings_amount: round_cents(
            income.saturating_mul(profile.savings_rate) / Decimal::ONE_HUNDRED,
        ),
        remaining_budget: round_cents(income.saturating_sub(month.expenses)),
        income_actual: round_cents(month.income),
        income_progress_percent: percent_of(month.income, income).round_dp(0),
        new_insights: count_new(insights),
        top_goals: top_goals(goals, DEFAULT_DISPLAY_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        recent_transactions: transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect(),
    }
}
