// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget-vs-actual evaluation of a profile's category allocations.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetType, Category, UserProfile};
use crate::utils::{percent_of, round_cents, sum_sat};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Currency amount budgeted for `category` this month.
pub fn budget_amount(profile: &UserProfile, category: Category) -> Decimal {
    let allocation = profile.allocation(category);
    match profile.budget_type {
        BudgetType::Percentage => profile.monthly_income.saturating_mul(allocation) / HUNDRED,
        BudgetType::Absolute => allocation,
    }
}

/// Budget for `category` as a percent of income.
///
/// `None` when the allocation is absolute and there is no income to relate it to.
pub fn budget_percentage(profile: &UserProfile, category: Category) -> Option<Decimal> {
    let allocation = profile.allocation(category);
    match profile.budget_type {
        BudgetType::Percentage => Some(allocation),
        BudgetType::Absolute => {
            if profile.monthly_income.is_zero() {
                None
            } else {
                Some(percent_of(allocation, profile.monthly_income))
            }
        }
    }
}

/// Income left for category budgets once savings are set aside.
pub fn available_for_budget(profile: &UserProfile) -> Decimal {
    profile
        .monthly_income
        .saturating_mul(Decimal::ONE - profile.savings_rate / HUNDRED)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub budget_amount: Decimal,
    pub budget_percentage: Option<Decimal>,
    pub actual_amount: Decimal,
    pub remaining: Decimal,
    /// Actual as a percent of budget, capped at 100.
    pub used_percent: Decimal,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub lines: Vec<BudgetLine>,
    pub total_budget: Decimal,
    pub available_for_budget: Decimal,
    pub budget_exceeded: bool,
    pub total_actual: Decimal,
    /// How far under the available amount spending is, in percent. `None` with nothing available.
    pub headroom_percent: Option<Decimal>,
}

impl BudgetReport {
    pub fn line(&self, category: Category) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.category == category)
    }

    pub fn over_budget_categories(&self) -> Vec<Category> {
        self.lines
            .iter()
            .filter(|l| l.over_budget)
            .map(|l| l.category)
            .collect()
    }
}

/// Compare the profile's budget against per-category actual spending.
///
/// Every expense category appears in the result, zero-filled when it has no spend.
pub fn evaluate(profile: &UserProfile, actuals: &BTreeMap<String, Decimal>) -> BudgetReport {
    let mut lines = Vec::with_capacity(Category::EXPENSE.len());
    let mut total_budget = Decimal::ZERO;

    for category in Category::EXPENSE {
        let budget = budget_amount(profile, category);
        let actual = actuals
            .get(category.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO);
        total_budget = total_budget.saturating_add(budget);

        lines.push(BudgetLine {
            category,
            budget_amount: round_cents(budget),
            budget_percentage: budget_percentage(profile, category).map(|p| p.round_dp(2)),
            actual_amount: round_cents(actual),
            remaining: round_cents(budget.saturating_sub(actual)),
            used_percent: percent_of(actual, budget).min(HUNDRED).round_dp(1),
            over_budget: actual > budget,
        });
    }

    let available = available_for_budget(profile);
    let total_actual = sum_sat(actuals.values().copied());
    let headroom_percent = if available.is_zero() {
        None
    } else {
        Some(percent_of(available.saturating_sub(total_actual), available).round_dp(1))
    };

    BudgetReport {
        lines,
        total_budget: round_cents(total_budget),
        available_for_budget: round_cents(available),
        budget_exceeded: total_budget > available,
        total_actual: round_cents(total_actual),
        headroom_percent,
    }
}
