use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};
pub use user::Actor;

mod reports;
mod server;
mod transactions;
mod user;
mod wallets;

pub mod types {
    pub mod wallet {
        pub use api_types::wallet::{
            WalletDetail, WalletListResponse, WalletNew, WalletUpdate, WalletView,
        };
    }

    pub mod membership {
        pub use api_types::membership::{Invite, MemberView, MembershipRole};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionKind, TransactionList, TransactionListResponse, TransactionNew,
            TransactionUpdate, TransactionView,
        };
    }

    pub mod report {
        pub use api_types::report::{CategoryTotal, Period, Summary, SummaryQuery, Totals};
    }
}

pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::AlreadyMember(_) | EngineError::DuplicateMembership(_) => {
            StatusCode::CONFLICT
        }
        EngineError::Database(_) | EngineError::AmountOverflow(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidKind(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidCategory(_)
        | EngineError::InvalidRole(_)
        | EngineError::InvalidPeriod(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::AmountOverflow(what) => {
            tracing::error!("stored amounts overflow: {what}");
            "internal server error".to_string()
        }
        other if other.is_validation() => {
            tracing::debug!("rejected request: {other}");
            other.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let ServerError::Engine(err) = self;
        let (status, error) = (status_for_engine_error(&err), message_for_engine_error(err));

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
