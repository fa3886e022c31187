use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::transaction::{
    TransactionKind as ApiKind, TransactionList, TransactionListResponse, TransactionNew,
    TransactionUpdate, TransactionView,
};
use engine::{Money, NewTransactionCmd, Transaction, TransactionKind, UpdateTransactionCmd};

use crate::{ServerError, server::ServerState, user::Actor};

fn engine_kind(kind: ApiKind) -> TransactionKind {
    match kind {
        ApiKind::Income => TransactionKind::Income,
        ApiKind::Expense => TransactionKind::Expense,
    }
}

pub(crate) fn api_kind(kind: TransactionKind) -> ApiKind {
    match kind {
        TransactionKind::Income => ApiKind::Income,
        TransactionKind::Expense => ApiKind::Expense,
    }
}

fn transaction_view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        wallet_id: tx.wallet_id,
        created_by_id: tx.created_by,
        kind: api_kind(tx.kind),
        category: tx.category,
        amount_minor: tx.amount.minor(),
        amount: tx.amount.to_string(),
        note: tx.note,
        date: tx.date,
        created_at: tx.created_at,
    }
}

pub async fn create(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = NewTransactionCmd::new(
        payload.wallet_id,
        engine_kind(payload.kind),
        payload.category,
        Money::new(payload.amount_minor),
        payload.date,
    );
    cmd.note = payload.note;

    let tx = state.engine.create_transaction(actor.id(), cmd).await?;
    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn list(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionList>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(actor.id(), query.wallet_id)
        .await?
        .into_iter()
        .map(transaction_view)
        .collect();
    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .get_transaction(actor.id(), transaction_id)
        .await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn update(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let cmd = UpdateTransactionCmd {
        kind: payload.kind.map(engine_kind),
        category: payload.category,
        amount: payload.amount_minor.map(Money::new),
        note: payload.note,
        date: payload.date,
    };
    let tx = state
        .engine
        .update_transaction(actor.id(), transaction_id, cmd)
        .await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn delete(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(actor.id(), transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
