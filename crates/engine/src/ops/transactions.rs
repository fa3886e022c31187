use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewTransactionCmd, ResultEngine, Transaction, UpdateTransactionCmd, memberships,
    transactions::{self, ensure_positive},
    util::{MAX_CATEGORY_LENGTH, normalize_note, normalize_required_text},
};

use super::{Engine, with_tx};

impl Engine {
    /// Record an income or expense on a wallet.
    pub async fn create_transaction(
        &self,
        user_id: &str,
        cmd: NewTransactionCmd,
    ) -> ResultEngine<Transaction> {
        ensure_positive(cmd.amount)?;
        let category = normalize_required_text(
            &cmd.category,
            "category",
            MAX_CATEGORY_LENGTH,
            EngineError::InvalidCategory,
        )?;
        let note = normalize_note(cmd.note.as_deref());

        with_tx!(self, |db_tx| {
            self.require_wallet(&db_tx, cmd.wallet_id).await?;
            let role = self.wallet_role(&db_tx, cmd.wallet_id, user_id).await?;
            if !self.policy.can_write_transaction(role) {
                tracing::debug!("{user_id} cannot write on wallet {}", cmd.wallet_id);
                return Err(EngineError::Forbidden(
                    "not allowed to record transactions on this wallet".to_string(),
                ));
            }

            let tx = Transaction::new(
                cmd.wallet_id,
                user_id.to_string(),
                cmd.kind,
                category,
                cmd.amount,
                note,
                cmd.date,
            )?;
            let model: transactions::ActiveModel = (&tx).into();
            model.insert(&db_tx).await?;
            tracing::info!(
                "transaction {} ({} {}) recorded on wallet {}",
                tx.id,
                tx.kind.as_str(),
                tx.amount,
                tx.wallet_id
            );
            Ok(tx)
        })
    }

    /// Transactions visible to `user_id`, newest first.
    ///
    /// With `wallet_id` only that wallet is listed and membership is
    /// required; without it every wallet the user belongs to is included.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        wallet_id: Option<Uuid>,
    ) -> ResultEngine<Vec<Transaction>> {
        with_tx!(self, |db_tx| {
            let wallet_ids: Vec<String> = match wallet_id {
                Some(wallet_id) => {
                    self.require_wallet_read(&db_tx, wallet_id, user_id).await?;
                    vec![wallet_id.to_string()]
                }
                None => memberships::Entity::find()
                    .filter(memberships::Column::UserId.eq(user_id.to_string()))
                    .all(&db_tx)
                    .await?
                    .into_iter()
                    .map(|m| m.wallet_id)
                    .collect(),
            };

            transactions::Entity::find()
                .filter(transactions::Column::WalletId.is_in(wallet_ids))
                .order_by_desc(transactions::Column::Date)
                .order_by_desc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    pub async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: Uuid,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            self.require_transaction_read(&db_tx, transaction_id, user_id)
                .await
        })
    }

    /// Patch a transaction. Only its creator or the wallet owner may do it.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: Uuid,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        if cmd.is_empty() {
            return Err(EngineError::MissingParameter(
                "at least one transaction field".to_string(),
            ));
        }
        if let Some(amount) = cmd.amount {
            ensure_positive(amount)?;
        }
        let category = cmd
            .category
            .as_deref()
            .map(|c| {
                normalize_required_text(
                    c,
                    "category",
                    MAX_CATEGORY_LENGTH,
                    EngineError::InvalidCategory,
                )
            })
            .transpose()?;

        with_tx!(self, |db_tx| {
            let mut tx = self
                .require_transaction_manage(&db_tx, transaction_id, user_id)
                .await?;

            if let Some(kind) = cmd.kind {
                tx.kind = kind;
            }
            if let Some(category) = category {
                tx.category = category;
            }
            if let Some(amount) = cmd.amount {
                tx.amount = amount;
            }
            if cmd.note.is_some() {
                tx.note = normalize_note(cmd.note.as_deref());
            }
            if let Some(date) = cmd.date {
                tx.date = date;
            }

            let model: transactions::ActiveModel = (&tx).into();
            model.update(&db_tx).await?;
            tracing::info!("transaction {transaction_id} updated by {user_id}");
            Ok(tx)
        })
    }

    /// Delete a transaction. Only its creator or the wallet owner may do it.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_transaction_manage(&db_tx, transaction_id, user_id)
                .await?;
            transactions::Entity::delete_by_id(transaction_id.to_string())
                .exec(&db_tx)
                .await?;
            tracing::info!("transaction {transaction_id} deleted by {user_id}");
            Ok(())
        })
    }
}
