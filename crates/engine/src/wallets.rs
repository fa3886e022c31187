//! The module contains `Wallet` struct and its implementation.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Membership, Money, util::parse_uuid};

/// A wallet.
///
/// A wallet is a personal or shared pot of money. It is owned by the user who
/// created it; other users reach it only through a [`Membership`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,
    pub name: String,
    /// The user who created the wallet. Always holds the `Owner` membership.
    pub owner_id: String,
    pub is_shared: bool,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(name: String, owner_id: String, is_shared: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            owner_id,
            is_shared,
            created_at: Utc::now(),
        }
    }
}

/// A wallet as seen by one of its members: the stored record plus the
/// derived balance and the member list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletDetail {
    pub wallet: Wallet,
    pub balance: Money,
    pub members: Vec<Membership>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub is_shared: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::memberships::Entity")]
    Memberships,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::memberships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Wallet> for ActiveModel {
    fn from(value: &Wallet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            owner_id: ActiveValue::Set(value.owner_id.clone()),
            is_shared: ActiveValue::Set(value.is_shared),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Wallet {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "wallet")?,
            name: model.name,
            owner_id: model.owner_id,
            is_shared: model.is_shared,
            created_at: model.created_at,
        })
    }
}
