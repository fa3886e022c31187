use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{ResultEngine, users};

use super::{Engine, with_tx};

impl Engine {
    /// Mirror an external identity. Calling it again for a known id only
    /// refreshes the username.
    pub async fn register_user(&self, user_id: &str, username: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            match users::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?
            {
                Some(model) if model.username == username => {}
                Some(model) => {
                    let mut active: users::ActiveModel = model.into();
                    active.username = ActiveValue::Set(username.to_string());
                    active.update(&db_tx).await?;
                }
                None => {
                    users::ActiveModel {
                        id: ActiveValue::Set(user_id.to_string()),
                        username: ActiveValue::Set(username.to_string()),
                        created_at: ActiveValue::Set(Utc::now()),
                    }
                    .insert(&db_tx)
                    .await?;
                    tracing::info!("registered user {user_id}");
                }
            }
            Ok(())
        })
    }

    /// `true` when `user_id` is a known identity.
    pub async fn user_exists(&self, user_id: &str) -> ResultEngine<bool> {
        Ok(users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .is_some())
    }
}
