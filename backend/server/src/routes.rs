use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State as AxumState},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::AppError,
    state::State,
    utils::{fetch_upstream, is_allowed},
};

pub const RELAY_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Deserialize)]
pub struct RelayParams {
    url: Option<String>,
}

pub async fn relay_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<RelayParams>,
) -> Result<Response, AppError> {
    let target = params
        .url
        .filter(|url| !url.is_empty())
        .ok_or(AppError::MissingUrl)?;

    if !is_allowed(&target, &state.config.allowed_domains) {
        warn!("Rejected relay target {target}");
        return Err(AppError::ForbiddenTarget);
    }

    info!("Relaying {target}");

    let upstream = fetch_upstream(&state, &target)
        .await
        .inspect_err(|e| warn!("Upstream fetch for {target} failed: {e:?}"))?;

    Ok((
        [(CONTENT_TYPE, RELAY_CONTENT_TYPE)],
        Body::from_stream(upstream.bytes_stream()),
    )
        .into_response())
}
