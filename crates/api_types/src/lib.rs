use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod wallet {
    use super::*;

    use crate::membership::MemberView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        #[serde(default)]
        pub is_shared: bool,
    }

    /// Partial update; absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WalletUpdate {
        pub name: Option<String>,
        pub is_shared: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: Uuid,
        pub name: String,
        pub owner_id: String,
        pub is_shared: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletListResponse {
        pub wallets: Vec<WalletView>,
    }

    /// A wallet as returned by `GET /wallets/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletDetail {
        #[serde(flatten)]
        pub wallet: WalletView,
        /// Income minus expenses, in minor units (cents).
        pub balance_minor: i64,
        /// `balance_minor` formatted with two decimals.
        pub balance: String,
        pub members: Vec<MemberView>,
    }
}

pub mod membership {
    use super::*;

    /// Role of a user on a wallet.
    ///
    /// - `OWNER`: full access, manages the wallet and its members.
    /// - `CONTRIBUTOR`: reads and records transactions.
    /// - `VIEWER`: reads; may record transactions unless the server runs
    ///   with `viewers_can_write = false`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum MembershipRole {
        Owner,
        Contributor,
        Viewer,
    }

    /// Request body for `POST /wallets/{id}/invite`. `role` defaults to viewer.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Invite {
        pub user_id: String,
        pub role: Option<MembershipRole>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub wallet_id: Uuid,
        pub user_id: String,
        pub role: MembershipRole,
        pub created_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Query string of `GET /transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub wallet_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub wallet_id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        /// Must be > 0, in minor units (cents).
        pub amount_minor: i64,
        pub note: Option<String>,
        pub date: NaiveDate,
    }

    /// Partial update; absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(rename = "type")]
        pub kind: Option<TransactionKind>,
        pub category: Option<String>,
        pub amount_minor: Option<i64>,
        pub note: Option<String>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub wallet_id: Uuid,
        pub created_by_id: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        pub amount_minor: i64,
        /// `amount_minor` formatted with two decimals.
        pub amount: String,
        pub note: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod report {
    use super::*;

    use crate::transaction::TransactionKind;

    /// Query string of `GET /reports/summary`.
    ///
    /// `wallet_id` is optional here so the server can answer with a 400
    /// instead of a generic rejection when it is missing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SummaryQuery {
        pub wallet_id: Option<Uuid>,
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Period {
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Totals {
        pub income_minor: i64,
        pub expense_minor: i64,
        pub balance_minor: i64,
        pub income: String,
        pub expense: String,
        pub balance: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotal {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        pub total_minor: i64,
        pub total: String,
        pub count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub wallet_id: Uuid,
        pub period: Period,
        pub totals: Totals,
        pub by_category: Vec<CategoryTotal>,
    }
}
