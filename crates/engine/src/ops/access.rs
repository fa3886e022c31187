use sea_orm::{DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Role, Transaction,
    access::{can_manage_transaction, can_manage_wallet, can_read},
    transactions, users, wallets,
};

use super::Engine;

/// Generates a `require_*` method that loads an entity by id or fails with
/// `KeyNotFound`.
macro_rules! impl_require_by_id {
    ($require_fn:ident, $entity:path, $model:path, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_by_id!(
        require_wallet,
        wallets::Entity,
        wallets::Model,
        "wallet not exists"
    );

    impl_require_by_id!(
        require_transaction,
        transactions::Entity,
        transactions::Model,
        "transaction not exists"
    );

    /// The actor's role on the wallet, `None` when not a member.
    pub(super) async fn wallet_role(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Option<Role>> {
        Ok(self
            .find_membership_in(db, wallet_id, user_id)
            .await?
            .map(|membership| membership.role))
    }

    /// Existing wallet the actor is a member of. Non-members get `Forbidden`.
    pub(super) async fn require_wallet_read(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<(wallets::Model, Option<Role>)> {
        let model = self.require_wallet(db, wallet_id).await?;
        let role = self.wallet_role(db, wallet_id, user_id).await?;
        if !can_read(role) {
            tracing::debug!("{user_id} is not a member of wallet {wallet_id}");
            return Err(EngineError::Forbidden(
                "not a member of this wallet".to_string(),
            ));
        }
        Ok((model, role))
    }

    /// Existing wallet the actor owns.
    pub(super) async fn require_wallet_owner(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<wallets::Model> {
        let model = self.require_wallet(db, wallet_id).await?;
        let role = self.wallet_role(db, wallet_id, user_id).await?;
        if !can_manage_wallet(role) {
            tracing::debug!("{user_id} is not the owner of wallet {wallet_id}");
            return Err(EngineError::Forbidden(
                "only the wallet owner can do this".to_string(),
            ));
        }
        Ok(model)
    }

    /// Existing transaction on a wallet the actor can read.
    pub(super) async fn require_transaction_read(
        &self,
        db: &DatabaseTransaction,
        transaction_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::try_from(self.require_transaction(db, transaction_id).await?)?;
        let role = self.wallet_role(db, tx.wallet_id, user_id).await?;
        if !can_read(role) {
            tracing::debug!("{user_id} cannot read transaction {transaction_id}");
            return Err(EngineError::Forbidden(
                "not a member of this wallet".to_string(),
            ));
        }
        Ok(tx)
    }

    /// Existing transaction the actor created, or on a wallet the actor owns.
    pub(super) async fn require_transaction_manage(
        &self,
        db: &DatabaseTransaction,
        transaction_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::try_from(self.require_transaction(db, transaction_id).await?)?;
        let role = self.wallet_role(db, tx.wallet_id, user_id).await?;
        if !can_manage_transaction(user_id, &tx, role) {
            tracing::debug!("{user_id} cannot manage transaction {transaction_id}");
            return Err(EngineError::Forbidden(
                "only the creator or the wallet owner can change this transaction".to_string(),
            ));
        }
        Ok(tx)
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
