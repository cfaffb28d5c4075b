// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form-level checks. Every failing field is reported, not just the first.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Error, FieldError, Result};
use crate::models::{Category, UserProfile};

fn finish<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Result<T> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(Error::Validation(errors))
    }
}

fn decimal_field(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

/// Raw goal form fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct GoalInput<'a> {
    pub title: &'a str,
    pub target_amount: &'a str,
    pub current_amount: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidGoal {
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

pub fn goal(input: &GoalInput<'_>) -> Result<ValidGoal> {
    let mut errors = Vec::new();

    let title = input.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Please enter a title"));
    }

    let target = decimal_field(input.target_amount).filter(|d| *d > Decimal::ZERO);
    if target.is_none() {
        errors.push(FieldError::new(
            "target_amount",
            "Please enter a valid target amount",
        ));
    }

    let current = if input.current_amount.trim().is_empty() {
        Some(Decimal::ZERO)
    } else {
        decimal_field(input.current_amount).filter(|d| *d >= Decimal::ZERO)
    };
    if current.is_none() {
        errors.push(FieldError::new(
            "current_amount",
            "Please enter a valid current amount",
        ));
    }

    finish(errors, || ValidGoal {
        title: title.to_string(),
        target_amount: target.unwrap_or_default(),
        current_amount: current.unwrap_or_default(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct TransactionInput<'a> {
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
    pub category: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
}

pub fn transaction(input: &TransactionInput<'_>) -> Result<ValidTransaction> {
    let mut errors = Vec::new();

    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d").ok();
    if date.is_none() {
        errors.push(FieldError::new("date", "Please enter a date as YYYY-MM-DD"));
    }

    let description = input.description.trim();
    if description.is_empty() {
        errors.push(FieldError::new("description", "Please enter a description"));
    }

    let amount = decimal_field(input.amount).filter(|d| !d.is_zero());
    if amount.is_none() {
        errors.push(FieldError::new("amount", "Please enter a valid, non-zero amount"));
    }

    let category = input.category.parse::<Category>().ok();
    if category.is_none() {
        errors.push(FieldError::new("category", "Please choose a category"));
    }

    finish(errors, || ValidTransaction {
        date: date.unwrap_or_default(),
        description: description.to_string(),
        amount: amount.unwrap_or_default(),
        category: category.unwrap_or(Category::Other),
    })
}

/// Checks the numeric invariants of a profile about to be saved.
pub fn profile(p: &UserProfile) -> Result<()> {
    let mut errors = Vec::new();
    if p.monthly_income < Decimal::ZERO {
        errors.push(FieldError::new(
            "monthly_income",
            "Monthly income cannot be negative",
        ));
    }
    if p.savings_rate < Decimal::ZERO || p.savings_rate > Decimal::ONE_HUNDRED {
        errors.push(FieldError::new(
            "savings_rate",
            "Savings rate must be between 0 and 100",
        ));
    }
    if p.allocations.values().any(|a| *a < Decimal::ZERO) {
        errors.push(FieldError::new(
            "allocations",
            "Budget allocations cannot be negative",
        ));
    }
    finish(errors, || ())
}
