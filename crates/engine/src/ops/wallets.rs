use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, Membership, Money, ResultEngine, Role, Totals, TransactionKind, UpdateWalletCmd,
    Wallet, WalletDetail, memberships, transactions,
    util::{MAX_WALLET_NAME_LENGTH, normalize_required_text},
    wallets,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a wallet owned by `user_id`.
    ///
    /// The wallet row and the owner's membership are written in the same DB
    /// transaction: if either insert fails neither is kept.
    pub async fn create_wallet(
        &self,
        user_id: &str,
        name: &str,
        is_shared: bool,
    ) -> ResultEngine<Wallet> {
        let name = normalize_required_text(
            name,
            "wallet name",
            MAX_WALLET_NAME_LENGTH,
            EngineError::InvalidName,
        )?;
        let wallet = Wallet::new(name, user_id.to_string(), is_shared);
        let wallet_model: wallets::ActiveModel = (&wallet).into();

        with_tx!(self, |db_tx| {
            wallet_model.insert(&db_tx).await?;
            self.create_membership_in(&db_tx, wallet.id, user_id, Role::Owner)
                .await
                .map_err(|err| match err {
                    // A fresh wallet has no members: anything here is a store failure.
                    EngineError::DuplicateMembership(user) => EngineError::Database(
                        DbErr::Custom(format!("owner membership for {user} already exists")),
                    ),
                    other => other,
                })?;
            tracing::info!("wallet {} created by {user_id}", wallet.id);
            Ok(wallet)
        })
    }

    /// Wallets where `user_id` holds any membership, newest first.
    pub async fn list_wallets(&self, user_id: &str) -> ResultEngine<Vec<Wallet>> {
        with_tx!(self, |db_tx| {
            wallets::Entity::find()
                .inner_join(memberships::Entity)
                .filter(memberships::Column::UserId.eq(user_id.to_string()))
                .distinct()
                .order_by_desc(wallets::Column::CreatedAt)
                .order_by_asc(wallets::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Wallet::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Wallet with its balance and members.
    pub async fn get_wallet(&self, user_id: &str, wallet_id: Uuid) -> ResultEngine<WalletDetail> {
        with_tx!(self, |db_tx| {
            let (model, _) = self.require_wallet_read(&db_tx, wallet_id, user_id).await?;
            let wallet = Wallet::try_from(model)?;
            let balance = self.balance_in(&db_tx, wallet_id).await?;
            let members: Vec<Membership> = self.list_members_in(&db_tx, wallet_id).await?;
            Ok(WalletDetail {
                wallet,
                balance,
                members,
            })
        })
    }

    /// Rename a wallet or flip its shared flag. Owner only.
    pub async fn update_wallet(
        &self,
        user_id: &str,
        wallet_id: Uuid,
        cmd: UpdateWalletCmd,
    ) -> ResultEngine<Wallet> {
        if cmd.is_empty() {
            return Err(EngineError::MissingParameter("name or is_shared".to_string()));
        }
        let name = cmd
            .name
            .as_deref()
            .map(|name| {
                normalize_required_text(
                    name,
                    "wallet name",
                    MAX_WALLET_NAME_LENGTH,
                    EngineError::InvalidName,
                )
            })
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self
                .require_wallet_owner(&db_tx, wallet_id, user_id)
                .await?;
            let mut active: wallets::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(is_shared) = cmd.is_shared {
                active.is_shared = ActiveValue::Set(is_shared);
            }
            let updated = active.update(&db_tx).await?;
            tracing::info!("wallet {wallet_id} updated by {user_id}");
            Wallet::try_from(updated)
        })
    }

    /// Delete a wallet together with its memberships and transactions. Owner only.
    pub async fn delete_wallet(&self, user_id: &str, wallet_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_wallet_owner(&db_tx, wallet_id, user_id)
                .await?;

            let removed_tx = transactions::Entity::delete_many()
                .filter(transactions::Column::WalletId.eq(wallet_id.to_string()))
                .exec(&db_tx)
                .await?
                .rows_affected;
            let removed_members = self.delete_all_for_wallet_in(&db_tx, wallet_id).await?;
            wallets::Entity::delete_by_id(wallet_id.to_string())
                .exec(&db_tx)
                .await?;

            tracing::info!(
                "wallet {wallet_id} deleted by {user_id} ({removed_tx} transactions, {removed_members} memberships)"
            );
            Ok(())
        })
    }

    /// `sum(INCOME) - sum(EXPENSE)` over the wallet's transactions.
    ///
    /// No access check: callers are expected to have authorized the read.
    pub async fn compute_balance(&self, wallet_id: Uuid) -> ResultEngine<Money> {
        with_tx!(self, |db_tx| { self.balance_in(&db_tx, wallet_id).await })
    }

    pub(super) async fn balance_in(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
    ) -> ResultEngine<Money> {
        let rows: Vec<(String, i64)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Kind)
            .column(transactions::Column::AmountMinor)
            .filter(transactions::Column::WalletId.eq(wallet_id.to_string()))
            .into_tuple()
            .all(db)
            .await?;

        // Folded here so overflow surfaces as `AmountOverflow`.
        let mut totals = Totals::default();
        for (kind, minor) in rows {
            totals.record(TransactionKind::try_from(kind.as_str())?, Money::new(minor))?;
        }
        Ok(totals.balance)
    }

    /// Add `target_user_id` to a wallet. Owner only; `role` defaults to viewer.
    pub async fn invite(
        &self,
        user_id: &str,
        wallet_id: Uuid,
        target_user_id: &str,
        role: Option<Role>,
    ) -> ResultEngine<Membership> {
        with_tx!(self, |db_tx| {
            self.require_wallet_owner(&db_tx, wallet_id, user_id)
                .await?;

            let role = role.unwrap_or_default();
            if role.is_owner() {
                return Err(EngineError::InvalidRole(
                    "a wallet has exactly one owner".to_string(),
                ));
            }
            self.require_user_exists(&db_tx, target_user_id).await?;

            let membership = self
                .create_membership_in(&db_tx, wallet_id, target_user_id, role)
                .await
                .map_err(|err| match err {
                    EngineError::DuplicateMembership(user) => EngineError::AlreadyMember(user),
                    other => other,
                })?;
            tracing::info!(
                "{target_user_id} joined wallet {wallet_id} as {}",
                role.as_str()
            );
            Ok(membership)
        })
    }
}
