use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkhash_core::ShortKey;
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;

    let shortened = state.shortener().shorten(&request.url).await?;

    let status = if shortened.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(CreateUrlResponse {
            message: shortened.message().to_string(),
            short_url: shortened.key.to_url(state.base_url()),
            key: shortened.key.to_string(),
            created: shortened.created,
        }),
    ))
}

pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let key = ShortKey::new(&key)?;
    let url = state.shortener().resolve(&key).await?;

    let location = HeaderValue::try_from(redirect_location(url)).map_err(|_| {
        AppError::Internal(format!(
            "url bound to '{key}' cannot be used as a redirect location"
        ))
    })?;
    debug!(key = %key, location = ?location, "redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn missing_key_handler() -> AppError {
    AppError::BadRequest("missing short key".to_string())
}

/// Urls stored without a scheme are sent as scheme-relative references so
/// the browser does not resolve them against the gateway's own origin.
fn redirect_location(url: String) -> String {
    if url.contains("://") {
        url
    } else {
        format!("//{url}")
    }
}
