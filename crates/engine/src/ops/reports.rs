use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Period, ResultEngine, Summary, Transaction, transactions};

use super::{Engine, with_tx};

impl Engine {
    /// Income/expense totals and per-category breakdown of a wallet,
    /// optionally restricted to a calendar month and/or year.
    pub async fn summary(
        &self,
        user_id: &str,
        wallet_id: Uuid,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ResultEngine<Summary> {
        let period = Period::new(month, year)?;

        with_tx!(self, |db_tx| {
            self.require_wallet_read(&db_tx, wallet_id, user_id).await?;

            // Oldest first so categories with equal totals keep their
            // first-seen order.
            let transactions = transactions::Entity::find()
                .filter(transactions::Column::WalletId.eq(wallet_id.to_string()))
                .order_by_asc(transactions::Column::Date)
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Transaction::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            Summary::build(wallet_id, period, &transactions)
        })
    }
}
