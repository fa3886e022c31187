//! Membership store.
//!
//! Store-level operations on `memberships`. They do not check who is asking:
//! the wallet service runs the authorization rules first and then calls the
//! `*_in` variants inside its own DB transaction.

use uuid::Uuid;

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Membership, ResultEngine, Role, memberships, util::is_unique_violation};

use super::{Engine, with_tx};

impl Engine {
    /// Inserts a membership for `(wallet_id, user_id)`.
    ///
    /// Fails with `DuplicateMembership` if the pair already exists.
    pub async fn create_membership(
        &self,
        wallet_id: Uuid,
        user_id: &str,
        role: Role,
    ) -> ResultEngine<Membership> {
        with_tx!(self, |db_tx| {
            self.create_membership_in(&db_tx, wallet_id, user_id, role)
                .await
        })
    }

    /// Returns the membership for `(wallet_id, user_id)`, if any.
    pub async fn find_membership(
        &self,
        wallet_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Option<Membership>> {
        with_tx!(self, |db_tx| {
            self.find_membership_in(&db_tx, wallet_id, user_id).await
        })
    }

    pub async fn is_owner(&self, wallet_id: Uuid, user_id: &str) -> ResultEngine<bool> {
        Ok(self
            .find_membership(wallet_id, user_id)
            .await?
            .is_some_and(|membership| membership.role.is_owner()))
    }

    pub(super) async fn create_membership_in(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        user_id: &str,
        role: Role,
    ) -> ResultEngine<Membership> {
        let membership = Membership::new(wallet_id, user_id.to_string(), role);
        let active: memberships::ActiveModel = (&membership).into();
        // Duplicates are detected by the unique index on (wallet_id, user_id).
        active.insert(db).await.map_err(|err| {
            if is_unique_violation(&err) {
                EngineError::DuplicateMembership(user_id.to_string())
            } else {
                EngineError::Database(err)
            }
        })?;

        Ok(membership)
    }

    pub(super) async fn find_membership_in(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Option<Membership>> {
        memberships::Entity::find()
            .filter(memberships::Column::WalletId.eq(wallet_id.to_string()))
            .filter(memberships::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .map(Membership::try_from)
            .transpose()
    }

    /// Members of a wallet, oldest first (the owner comes first).
    pub(super) async fn list_members_in(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
    ) -> ResultEngine<Vec<Membership>> {
        memberships::Entity::find()
            .filter(memberships::Column::WalletId.eq(wallet_id.to_string()))
            .order_by_asc(memberships::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(Membership::try_from)
            .collect()
    }

    /// Cascade hook for wallet deletion. Returns the number of rows removed.
    pub(super) async fn delete_all_for_wallet_in(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
    ) -> ResultEngine<u64> {
        let res = memberships::Entity::delete_many()
            .filter(memberships::Column::WalletId.eq(wallet_id.to_string()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
