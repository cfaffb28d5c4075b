// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{FinancialGoal, GoalStatus};
use crate::utils::{percent_of, sum_sat};

/// Goals shown on the dashboard summary.
pub const DEFAULT_DISPLAY_LIMIT: usize = 3;

impl FinancialGoal {
    /// Completion ratio in percent; 0 when there is no positive target.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        percent_of(self.current_amount, self.target_amount)
    }

    pub fn tier(&self) -> ProgressTier {
        ProgressTier::for_percent(self.progress_percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Success,
    Primary,
    Warning,
}

impl ProgressTier {
    /// Goals-list colouring: 75% and up is success, 40% and up is primary.
    pub fn for_percent(p: Decimal) -> Self {
        if p >= Decimal::from(75) {
            ProgressTier::Success
        } else if p >= Decimal::from(40) {
            ProgressTier::Primary
        } else {
            ProgressTier::Warning
        }
    }
}

fn rank_order(a: &FinancialGoal, b: &FinancialGoal) -> Ordering {
    let a_active = a.status == GoalStatus::InProgress;
    let b_active = b.status == GoalStatus::InProgress;
    let a_targeted = a.target_amount > Decimal::ZERO;
    let b_targeted = b.target_amount > Decimal::ZERO;
    b_active
        .cmp(&a_active)
        .then_with(|| b_targeted.cmp(&a_targeted))
        .then_with(|| b.progress_percent().cmp(&a.progress_percent()))
}

/// Open goals, in-progress first, then by completion descending.
///
/// Goals without a positive target go last within their status group.
/// Completed goals are dropped. Ties keep their input order.
pub fn rank(goals: &[FinancialGoal]) -> Vec<&FinancialGoal> {
    let mut open: Vec<&FinancialGoal> = goals
        .iter()
        .filter(|g| g.status != GoalStatus::Completed)
        .collect();
    open.sort_by(|a, b| rank_order(a, b));
    open
}

pub fn top_goals(goals: &[FinancialGoal], limit: usize) -> Vec<&FinancialGoal> {
    let mut ranked = rank(goals);
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub total_target: Decimal,
    pub total_current: Decimal,
    /// Saved across all goals as a percent of their combined target, capped at 100.
    pub overall_percent: Decimal,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn summarize(goals: &[FinancialGoal]) -> GoalSummary {
    let total_target = sum_sat(goals.iter().map(|g| g.target_amount));
    let total_current = sum_sat(goals.iter().map(|g| g.current_amount));
    GoalSummary {
        total_target,
        total_current,
        overall_percent: percent_of(total_current, total_target)
            .min(Decimal::ONE_HUNDRED)
            .round_dp(1),
        in_progress: goals
            .iter()
            .filter(|g| g.status == GoalStatus::InProgress)
            .count(),
        completed: goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count(),
    }
}

/// Human label for the time left until `deadline`.
pub fn time_remaining(deadline: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(deadline) = deadline else {
        return "No deadline".to_string();
    };
    let days = (deadline - today).num_days();
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 30 => format!("{} days", d),
        d if d < 365 => format!("{} months", d / 30),
        d => format!("{} years", d / 365),
    }
}
