// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Closed string enumeration stored and serialized by its snake_case name.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => $s:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $s),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim() {
                    $($s => Ok($name::$variant),)+
                    other => Err(Error::InvalidData(format!(
                        "Unknown {} '{}' (expected one of: {})",
                        $what,
                        other,
                        [$($s),+].join(", ")
                    ))),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                s.parse::<$name>()
                    .map_err(|e| FromSqlError::Other(e.to_string().into()))
            }
        }
    };
}

string_enum! {
    /// Transaction category.
    Category, "category" {
        Housing => "housing",
        Transportation => "transportation",
        Food => "food",
        Utilities => "utilities",
        Insurance => "insurance",
        Healthcare => "healthcare",
        Debt => "debt",
        Entertainment => "entertainment",
        Personal => "personal",
        Education => "education",
        Shopping => "shopping",
        Income => "income",
        Other => "other",
    }
}

impl Category {
    /// Categories that carry a budget allocation (everything but income).
    pub const EXPENSE: [Category; 12] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Debt,
        Category::Entertainment,
        Category::Personal,
        Category::Education,
        Category::Shopping,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::Healthcare => "Healthcare",
            Category::Debt => "Debt Payments",
            Category::Entertainment => "Entertainment",
            Category::Personal => "Personal",
            Category::Education => "Education",
            Category::Shopping => "Shopping",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Housing => "🏠",
            Category::Transportation => "🚗",
            Category::Food => "🍔",
            Category::Utilities => "💡",
            Category::Insurance => "🛡️",
            Category::Healthcare => "🏥",
            Category::Debt => "💳",
            Category::Entertainment => "🎬",
            Category::Personal => "👤",
            Category::Education => "🎓",
            Category::Shopping => "🛍️",
            Category::Income => "💰",
            Category::Other => "📦",
        }
    }

    /// Display category for a raw stored value; unknown or empty values show as `other`.
    pub fn display_for(raw: &str) -> Category {
        raw.parse().unwrap_or(Category::Other)
    }
}

/// Icon for a raw category value, falling back to the `other` icon.
pub fn icon_for(raw: &str) -> &'static str {
    Category::display_for(raw).icon()
}

string_enum! {
    /// Financial goal category.
    GoalCategory, "goal category" {
        EmergencyFund => "emergency_fund",
        DebtRepayment => "debt_repayment",
        Retirement => "retirement",
        MajorPurchase => "major_purchase",
        Education => "education",
        Travel => "travel",
        Home => "home",
        Other => "other",
    }
}

string_enum! {
    GoalStatus, "goal status" {
        NotStarted => "not_started",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

string_enum! {
    /// Lifecycle state of a generated insight. `Implemented` and `Dismissed` are terminal.
    InsightStatus, "insight status" {
        New => "new",
        Implemented => "implemented",
        Dismissed => "dismissed",
    }
}

string_enum! {
    InsightCategory, "insight category" {
        Spending => "spending",
        Saving => "saving",
        Investing => "investing",
        Debt => "debt",
        Income => "income",
        General => "general",
    }
}

string_enum! {
    PriorityLevel, "priority level" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

string_enum! {
    /// How per-category allocations are interpreted.
    BudgetType, "budget type" {
        Percentage => "percentage",
        Absolute => "absolute",
    }
}

string_enum! {
    PaymentMethod, "payment method" {
        Cash => "cash",
        CreditCard => "credit_card",
        DebitCard => "debit_card",
        BankTransfer => "bank_transfer",
        Other => "other",
    }
}

string_enum! {
    CurrencyCode, "currency" {
        Usd => "USD",
        Eur => "EUR",
        Gbp => "GBP",
        Inr => "INR",
        Cad => "CAD",
        Aud => "AUD",
        Jpy => "JPY",
    }
}

string_enum! {
    LiteracyLevel, "financial literacy level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    RiskTolerance, "risk tolerance" {
        Conservative => "conservative",
        Moderate => "moderate",
        Aggressive => "aggressive",
    }
}

string_enum! {
    /// Transaction list type filter.
    TransactionKind, "transaction type" {
        All => "all",
        Income => "income",
        Expense => "expense",
    }
}

string_enum! {
    SortOrder, "sort order" {
        Newest => "newest",
        Oldest => "oldest",
        Highest => "highest",
        Lowest => "lowest",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    /// Raw stored category. Aggregation keys by this literal value.
    pub category: String,
    /// Positive is income, negative is an expense.
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

impl Transaction {
    /// Aggregation key: the literal category, or `other` when it is blank.
    pub fn category_key(&self) -> &str {
        if self.category.trim().is_empty() {
            "other"
        } else {
            &self.category
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: i64,
    pub title: String,
    pub category: GoalCategory,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: InsightCategory,
    pub priority_level: PriorityLevel,
    pub date_generated: NaiveDate,
    pub status: InsightStatus,
}

/// The single per-user financial profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub monthly_income: Decimal,
    /// Percent of income set aside, 0..=100.
    pub savings_rate: Decimal,
    pub currency: CurrencyCode,
    pub budget_type: BudgetType,
    /// Per-category allocation; percent of income or a fixed amount depending on `budget_type`.
    pub allocations: BTreeMap<Category, Decimal>,
    pub financial_literacy_level: LiteracyLevel,
    pub risk_tolerance: RiskTolerance,
}

/// Savings rate assumed until the user saves one.
pub fn default_savings_rate() -> Decimal {
    Decimal::from(15)
}

/// Starting allocation (percent of income) for a category without a saved value.
pub fn default_allocation(category: Category) -> Decimal {
    match category {
        Category::Housing => Decimal::from(30),
        Category::Food => Decimal::from(15),
        Category::Transportation | Category::Utilities => Decimal::from(10),
        _ => Decimal::from(5),
    }
}

impl UserProfile {
    /// Allocation for a category, falling back to the default split.
    pub fn allocation(&self, category: Category) -> Decimal {
        self.allocations
            .get(&category)
            .copied()
            .unwrap_or_else(|| default_allocation(category))
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            monthly_income: Decimal::ZERO,
            savings_rate: default_savings_rate(),
            currency: CurrencyCode::Usd,
            budget_type: BudgetType::Percentage,
            allocations: Category::EXPENSE
                .iter()
                .map(|c| (*c, default_allocation(*c)))
                .collect(),
            financial_literacy_level: LiteracyLevel::Beginner,
            risk_tolerance: RiskTolerance::Moderate,
        }
    }
}
