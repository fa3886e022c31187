//! Wallet endpoints, including member invitations.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::{
    membership::{Invite, MemberView, MembershipRole},
    wallet::{WalletDetail, WalletListResponse, WalletNew, WalletUpdate, WalletView},
};
use engine::{Membership, Role, UpdateWalletCmd, Wallet};

use crate::{ServerError, server::ServerState, user::Actor};

fn wallet_view(wallet: Wallet) -> WalletView {
    WalletView {
        id: wallet.id,
        name: wallet.name,
        owner_id: wallet.owner_id,
        is_shared: wallet.is_shared,
        created_at: wallet.created_at,
    }
}

fn member_view(membership: Membership) -> MemberView {
    MemberView {
        id: membership.id,
        wallet_id: membership.wallet_id,
        user_id: membership.user_id,
        role: match membership.role {
            Role::Owner => MembershipRole::Owner,
            Role::Contributor => MembershipRole::Contributor,
            Role::Viewer => MembershipRole::Viewer,
        },
        created_at: membership.created_at,
    }
}

pub async fn create(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<WalletNew>,
) -> Result<(StatusCode, Json<WalletView>), ServerError> {
    let wallet = state
        .engine
        .create_wallet(actor.id(), &payload.name, payload.is_shared)
        .await?;
    Ok((StatusCode::CREATED, Json(wallet_view(wallet))))
}

pub async fn list(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
) -> Result<Json<WalletListResponse>, ServerError> {
    let wallets = state
        .engine
        .list_wallets(actor.id())
        .await?
        .into_iter()
        .map(wallet_view)
        .collect();
    Ok(Json(WalletListResponse { wallets }))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<WalletDetail>, ServerError> {
    let detail = state.engine.get_wallet(actor.id(), wallet_id).await?;
    Ok(Json(WalletDetail {
        wallet: wallet_view(detail.wallet),
        balance_minor: detail.balance.minor(),
        balance: detail.balance.to_string(),
        members: detail.members.into_iter().map(member_view).collect(),
    }))
}

pub async fn update(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
    Json(payload): Json<WalletUpdate>,
) -> Result<Json<WalletView>, ServerError> {
    let wallet = state
        .engine
        .update_wallet(
            actor.id(),
            wallet_id,
            UpdateWalletCmd {
                name: payload.name,
                is_shared: payload.is_shared,
            },
        )
        .await?;
    Ok(Json(wallet_view(wallet)))
}

pub async fn delete(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_wallet(actor.id(), wallet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn invite(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
    Json(payload): Json<Invite>,
) -> Result<(StatusCode, Json<MemberView>), ServerError> {
    let role = payload.role.map(|role| match role {
        MembershipRole::Owner => Role::Owner,
        MembershipRole::Contributor => Role::Contributor,
        MembershipRole::Viewer => Role::Viewer,
    });
    let membership = state
        .engine
        .invite(actor.id(), wallet_id, &payload.user_id, role)
        .await?;
    Ok((StatusCode::CREATED, Json(member_view(membership))))
}
