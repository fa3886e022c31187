//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Money, TransactionKind};

/// Record an income or expense on a wallet.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub wallet_id: Uuid,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub note: Option<String>,
    pub date: NaiveDate,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn new(
        wallet_id: Uuid,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            wallet_id,
            kind,
            category: category.into(),
            amount,
            note: None,
            date,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Partial update of a transaction. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateTransactionCmd {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
}

impl UpdateTransactionCmd {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.note.is_none()
            && self.date.is_none()
    }
}

/// Partial update of a wallet. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateWalletCmd {
    pub name: Option<String>,
    pub is_shared: Option<bool>,
}

impl UpdateWalletCmd {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_shared.is_none()
    }
}
