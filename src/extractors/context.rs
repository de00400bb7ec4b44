//! Build a fresh [`StudentContext`] for each request from the shared pool.

use crate::service::StudentContext;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

#[async_trait]
impl<S> FromRequestParts<S> for StudentContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(StudentContext::new(state.pool))
    }
}
