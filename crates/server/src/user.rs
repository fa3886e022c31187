//! Caller identity.
//!
//! Authentication happens upstream: the identity provider forwards the
//! authenticated user's opaque id in the `x-user-id` header. The middleware
//! here only checks that the id is a known user and exposes it to handlers as
//! an [`Actor`] extension.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use crate::server::ServerState;

static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// The authenticated user a request acts on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor(pub String);

impl Actor {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// `TypedHeader` for the `x-user-id` header.
#[derive(Debug)]
pub(crate) struct UserIdHeader(String);

impl Header for UserIdHeader {
    fn name() -> &'static HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserIdHeader(value.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-id header"),
        }
    }
}

pub(crate) async fn auth(
    user_header: Option<TypedHeader<UserIdHeader>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(UserIdHeader(user_id))) = user_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let known = state.engine.user_exists(&user_id).await.map_err(|err| {
        tracing::error!("failed to resolve user {user_id}: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !known {
        tracing::debug!("rejecting unknown user {user_id}");
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(Actor(user_id));
    Ok(next.run(request).await)
}
