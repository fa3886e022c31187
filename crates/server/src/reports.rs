use axum::{
    Extension, Json,
    extract::{Query, State},
};

use api_types::report::{CategoryTotal, Period, Summary, SummaryQuery, Totals};
use engine::EngineError;

use crate::{ServerError, server::ServerState, transactions::api_kind, user::Actor};

pub async fn summary(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, ServerError> {
    let wallet_id = query
        .wallet_id
        .ok_or_else(|| EngineError::MissingParameter("wallet_id".to_string()))?;

    let summary = state
        .engine
        .summary(actor.id(), wallet_id, query.month, query.year)
        .await?;

    let totals = summary.totals;
    Ok(Json(Summary {
        wallet_id: summary.wallet_id,
        period: Period {
            month: summary.period.month,
            year: summary.period.year,
        },
        totals: Totals {
            income_minor: totals.income.minor(),
            expense_minor: totals.expense.minor(),
            balance_minor: totals.balance.minor(),
            income: totals.income.to_string(),
            expense: totals.expense.to_string(),
            balance: totals.balance.to_string(),
        },
        by_category: summary
            .by_category
            .into_iter()
            .map(|row| CategoryTotal {
                kind: api_kind(row.kind),
                category: row.category,
                total_minor: row.total.minor(),
                total: row.total.to_string(),
                count: row.count,
            })
            .collect(),
    }))
}
