// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting windows: the inclusive start date for a month, quarter or year
//! ending at a reference date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "year" => Ok(Granularity::Year),
            _ => Err(Error::InvalidGranularity(s.to_string())),
        }
    }
}

/// First day of the window containing `reference`.
pub fn resolve(reference: NaiveDate, granularity: Granularity) -> NaiveDate {
    let year = reference.year();
    let month = match granularity {
        Granularity::Month => reference.month(),
        Granularity::Quarter => (reference.month0() / 3) * 3 + 1,
        Granularity::Year => 1,
    };
    // Day 1 of a month taken from a valid date always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(reference)
}

/// A resolved reporting window. `start` is inclusive; `end` is the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(reference: NaiveDate, granularity: Granularity) -> Self {
        Self {
            granularity,
            start: resolve(reference, granularity),
            end: reference,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start
    }

    /// Heading for the window, e.g. "October 2026", "Q4 2026" or "2026".
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Month => self.end.format("%B %Y").to_string(),
            Granularity::Quarter => {
                format!("Q{} {}", self.end.month0() / 3 + 1, self.end.year())
            }
            Granularity::Year => self.end.year().to_string(),
        }
    }
}
