// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::CurrencyCode;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Reference date for reports: `--as-of` when given, otherwise today.
pub fn as_of(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Round to cents, halves away from zero.
pub fn round_cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Largest representable value with the sign `a op b` would have.
fn saturated(a: Decimal, b: Decimal) -> Decimal {
    if a.is_sign_negative() != b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `a / b`, saturating instead of overflowing; 0 when `b` is zero.
pub fn div_sat(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    a.checked_div(b).unwrap_or_else(|| saturated(a, b))
}

/// Saturating sum of decimal values.
pub fn sum_sat<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// `part` as a percent of `whole`; 0 when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    div_sat(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

pub fn currency_symbol(code: &str) -> &'static str {
    match code.parse::<CurrencyCode>() {
        Ok(CurrencyCode::Eur) => "€",
        Ok(CurrencyCode::Gbp) => "£",
        Ok(CurrencyCode::Inr) => "₹",
        Ok(CurrencyCode::Jpy) => "¥",
        _ => "$",
    }
}

/// `-$1,234.50` style display amount.
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let fixed = format!("{:.2}", round_cents(amount).abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    // ASCII digits only, so byte length equals char count.
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < Decimal::ZERO && !round_cents(amount).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, currency_symbol(code), grouped, frac)
}

pub fn fmt_opt_percent(p: Option<Decimal>) -> String {
    p.map(|v| format!("{}%", v)).unwrap_or_else(|| "n/a".into())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
