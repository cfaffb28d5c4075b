// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Insight status lifecycle: `new` moves once to `implemented` or `dismissed`.

use crate::error::{Error, Result};
use crate::models::{FinancialInsight, InsightCategory, InsightStatus, PriorityLevel};

impl InsightStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InsightStatus::New)
    }

    pub fn can_transition_to(&self, to: InsightStatus) -> bool {
        matches!(
            (self, to),
            (
                InsightStatus::New,
                InsightStatus::Implemented | InsightStatus::Dismissed
            )
        )
    }

    /// Validated transition; anything other than leaving `new` is rejected.
    pub fn transition(self, to: InsightStatus) -> Result<InsightStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(Error::InvalidTransition { from: self, to })
        }
    }
}

impl FinancialInsight {
    pub fn implement(&mut self) -> Result<()> {
        self.status = self.status.transition(InsightStatus::Implemented)?;
        Ok(())
    }

    pub fn dismiss(&mut self) -> Result<()> {
        self.status = self.status.transition(InsightStatus::Dismissed)?;
        Ok(())
    }
}

/// Insight list filters; `None` means "all".
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightFilter {
    pub status: Option<InsightStatus>,
    pub category: Option<InsightCategory>,
    pub priority: Option<PriorityLevel>,
}

impl InsightFilter {
    pub fn matches(&self, i: &FinancialInsight) -> bool {
        self.status.is_none_or(|s| i.status == s)
            && self.category.is_none_or(|c| i.category == c)
            && self.priority.is_none_or(|p| i.priority_level == p)
    }

    pub fn apply<'a>(&self, insights: &'a [FinancialInsight]) -> Vec<&'a FinancialInsight> {
        insights.iter().filter(|i| self.matches(i)).collect()
    }
}

pub fn count_new(insights: &[FinancialInsight]) -> usize {
    insights
        .iter()
        .filter(|i| i.status == InsightStatus::New)
        .count()
}
