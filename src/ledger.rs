// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use regex::RegexBuilder;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{SortOrder, Transaction, TransactionKind};

/// Filters and ordering for the transaction list and its exports.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    /// Case-insensitive literal matched against description and notes.
    pub search: Option<String>,
    pub kind: TransactionKind,
    /// Literal category value; `None` keeps every category.
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            search: None,
            kind: TransactionKind::All,
            category: None,
            from: None,
            to: None,
            sort: SortOrder::Newest,
            limit: None,
        }
    }
}

impl TransactionQuery {
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Result<Vec<&'a Transaction>> {
        let search = match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Some(
                RegexBuilder::new(&regex::escape(q))
                    .case_insensitive(true)
                    .build()?,
            ),
            _ => None,
        };

        let mut rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| {
                search.as_ref().is_none_or(|re| {
                    re.is_match(&t.description)
                        || t.notes.as_deref().is_some_and(|n| re.is_match(n))
                })
            })
            .filter(|t| match self.kind {
                TransactionKind::All => true,
                TransactionKind::Income => t.amount > Decimal::ZERO,
                TransactionKind::Expense => t.amount < Decimal::ZERO,
            })
            .filter(|t| self.category.as_deref().is_none_or(|c| t.category == c))
            .filter(|t| self.from.is_none_or(|d| t.date >= d))
            .filter(|t| self.to.is_none_or(|d| t.date <= d))
            .collect();

        match self.sort {
            SortOrder::Newest => rows.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::Oldest => rows.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Highest => rows.sort_by(|a, b| b.amount.abs().cmp(&a.amount.abs())),
            SortOrder::Lowest => rows.sort_by(|a, b| a.amount.abs().cmp(&b.amount.abs())),
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}
