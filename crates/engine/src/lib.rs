//! Shared-wallet ledger engine.
//!
//! Users own or share wallets through memberships, record incomes and
//! expenses on them and query summary reports. Every operation takes the
//! acting user's id and goes through the rules in [`access`] before touching
//! the store.

pub use access::AccessPolicy;
pub use commands::{NewTransactionCmd, UpdateTransactionCmd, UpdateWalletCmd};
pub use error::EngineError;
pub use memberships::{Membership, Role};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use reports::{CategoryTotal, Period, Summary, Totals};
pub use transactions::{Transaction, TransactionKind};
pub use wallets::{Wallet, WalletDetail};

pub mod access;
mod commands;
mod error;
mod memberships;
mod money;
mod ops;
mod reports;
mod transactions;
mod users;
mod util;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
