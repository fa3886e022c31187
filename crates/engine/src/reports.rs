//! Aggregation of transactions into summary reports.
//!
//! Everything here is pure: the engine loads a wallet's transactions through
//! the membership-checked path and hands them to [`Summary::build`].

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, Transaction, TransactionKind};

/// Optional calendar filter. `month` and `year` are independent: a month
/// without a year matches that month in every year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl Period {
    pub fn new(month: Option<u32>, year: Option<i32>) -> ResultEngine<Self> {
        if let Some(month) = month
            && !(1..=12).contains(&month)
        {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { month, year })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.month.is_none_or(|m| date.month() == m) && self.year.is_none_or(|y| date.year() == y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    /// `income - expense`, may be negative.
    pub balance: Money,
}

impl Totals {
    /// Adds one transaction amount to its side and refreshes the balance.
    pub(crate) fn record(&mut self, kind: TransactionKind, amount: Money) -> ResultEngine<()> {
        let side = match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        };
        *side = side
            .checked_add(amount)
            .ok_or_else(|| EngineError::AmountOverflow(format!("{} total", kind.as_str())))?;
        self.balance = self
            .income
            .checked_sub(self.expense)
            .ok_or_else(|| EngineError::AmountOverflow("balance".to_string()))?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub kind: TransactionKind,
    pub category: String,
    pub total: Money,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub wallet_id: Uuid,
    pub period: Period,
    pub totals: Totals,
    /// One row per `(kind, category)`, kind ascending by wire name then total
    /// descending. Equal totals keep first-seen order.
    pub by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// Fails with [`EngineError::AmountOverflow`] when a total does not fit.
    pub fn build(
        wallet_id: Uuid,
        period: Period,
        transactions: &[Transaction],
    ) -> ResultEngine<Self> {
        let mut totals = Totals::default();
        let mut rows: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<(TransactionKind, &str), usize> = HashMap::new();

        for tx in transactions.iter().filter(|tx| period.contains(tx.date)) {
            totals.record(tx.kind, tx.amount)?;

            let slot = *index
                .entry((tx.kind, tx.category.as_str()))
                .or_insert_with(|| {
                    rows.push(CategoryTotal {
                        kind: tx.kind,
                        category: tx.category.clone(),
                        total: Money::ZERO,
                        count: 0,
                    });
                    rows.len() - 1
                });
            let row = &mut rows[slot];
            row.total = row.total.checked_add(tx.amount).ok_or_else(|| {
                EngineError::AmountOverflow(format!("category {:?} total", row.category))
            })?;
            row.count += 1;
        }

        // Stable sort keeps first-seen order for ties.
        rows.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| b.total.cmp(&a.total))
        });

        Ok(Self {
            wallet_id,
            period,
            totals,
            by_category: rows,
        })
    }
}
