//! The module contains the error the engine can throw.
//!
//! The errors fall in four families:
//!
//! - validation: [`InvalidAmount`], [`InvalidKind`], [`InvalidName`],
//!   [`InvalidCategory`], [`InvalidRole`], [`InvalidPeriod`] and
//!   [`MissingParameter`], the request itself is wrong;
//! - [`KeyNotFound`] thrown when an item is not found;
//! - [`Forbidden`] thrown when the actor lacks the required membership/role;
//! - conflicts: [`AlreadyMember`] and [`DuplicateMembership`].
//!
//! Everything the store reports is wrapped in [`Database`]. [`AmountOverflow`]
//! means stored amounts add up past what a [`Money`](crate::Money) can hold.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidRole`]: EngineError::InvalidRole
//!  [`InvalidPeriod`]: EngineError::InvalidPeriod
//!  [`MissingParameter`]: EngineError::MissingParameter
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`AlreadyMember`]: EngineError::AlreadyMember
//!  [`DuplicateMembership`]: EngineError::DuplicateMembership
//!  [`Database`]: EngineError::Database
//!  [`AmountOverflow`]: EngineError::AmountOverflow
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("\"{0}\" is required")]
    MissingParameter(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" is already a member of this wallet")]
    AlreadyMember(String),
    #[error("\"{0}\" already has a membership on this wallet")]
    DuplicateMembership(String),
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for errors caused by the request rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidKind(_)
                | Self::InvalidName(_)
                | Self::InvalidCategory(_)
                | Self::InvalidRole(_)
                | Self::InvalidPeriod(_)
                | Self::MissingParameter(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidRole(a), Self::InvalidRole(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::MissingParameter(a), Self::MissingParameter(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::AlreadyMember(a), Self::AlreadyMember(b)) => a == b,
            (Self::DuplicateMembership(a), Self::DuplicateMembership(b)) => a == b,
            (Self::AmountOverflow(a), Self::AmountOverflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
