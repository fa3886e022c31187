//! Authorization predicates.
//!
//! Every decision is a pure function of the actor's [`Role`] on the wallet
//! involved (`None` when the actor has no membership) and, for transaction
//! management, of the transaction's creator. Storage lookups happen in the
//! engine before these are consulted, so the rules can be tested in isolation.

use crate::{Role, Transaction};

/// Tunable part of the access rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    /// When `true` (default) any member, viewers included, may record
    /// transactions. When `false` only contributors and owners may.
    pub viewers_can_write: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            viewers_can_write: true,
        }
    }
}

impl AccessPolicy {
    /// Whether a member holding `role` may create transactions on the wallet.
    pub fn can_write_transaction(&self, role: Option<Role>) -> bool {
        match role {
            Some(Role::Owner | Role::Contributor) => true,
            Some(Role::Viewer) => self.viewers_can_write,
            None => false,
        }
    }
}

/// Any membership grants read access to the wallet, its transactions and its
/// reports.
pub fn can_read(role: Option<Role>) -> bool {
    role.is_some()
}

/// Update, delete and invite are reserved to the wallet owner.
pub fn can_manage_wallet(role: Option<Role>) -> bool {
    role.is_some_and(Role::is_owner)
}

/// Update/delete of a transaction: its creator or the owner of its wallet.
///
/// `role` must be the actor's role on `transaction.wallet_id`. The two
/// privileges are OR'd.
pub fn can_manage_transaction(actor_id: &str, transaction: &Transaction, role: Option<Role>) -> bool {
    transaction.created_by == actor_id || can_manage_wallet(role)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::{Money, TransactionKind};

    fn tx_by(creator: &str) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            creator.to_string(),
            TransactionKind::Expense,
            "Food".to_string(),
            Money::new(1000),
            String::new(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn every_role_can_read_outsiders_cannot() {
        assert!(can_read(Some(Role::Owner)));
        assert!(can_read(Some(Role::Contributor)));
        assert!(can_read(Some(Role::Viewer)));
        assert!(!can_read(None));
    }

    #[test]
    fn only_owner_manages_wallet() {
        assert!(can_manage_wallet(Some(Role::Owner)));
        assert!(!can_manage_wallet(Some(Role::Contributor)));
        assert!(!can_manage_wallet(Some(Role::Viewer)));
        assert!(!can_manage_wallet(None));
    }

    #[test]
    fn default_policy_lets_any_member_write() {
        let policy = AccessPolicy::default();
        assert!(policy.can_write_transaction(Some(Role::Owner)));
        assert!(policy.can_write_transaction(Some(Role::Contributor)));
        assert!(policy.can_write_transaction(Some(Role::Viewer)));
        assert!(!policy.can_write_transaction(None));
    }

    #[test]
    fn strict_policy_keeps_viewers_read_only() {
        let policy = AccessPolicy {
            viewers_can_write: false,
        };
        assert!(policy.can_write_transaction(Some(Role::Contributor)));
        assert!(!policy.can_write_transaction(Some(Role::Viewer)));
    }

    #[test]
    fn creator_or_owner_manages_transaction() {
        let tx = tx_by("bob");

        // Creator, whatever the role.
        assert!(can_manage_transaction("bob", &tx, Some(Role::Viewer)));
        assert!(can_manage_transaction("bob", &tx, Some(Role::Contributor)));
        // Owner, even if someone else created it.
        assert!(can_manage_transaction("alice", &tx, Some(Role::Owner)));
        // Neither.
        assert!(!can_manage_transaction("carol", &tx, Some(Role::Contributor)));
        assert!(!can_manage_transaction("carol", &tx, None));
    }
}
