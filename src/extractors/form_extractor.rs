use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{FromRef, FromRequest, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use tracing::debug;

use crate::{
    config::AppConfig,
    errors::api_error::ApiError,
    utils::form_values::{parse_into, FormError, FormValues},
};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Every form field of the request: body fields first when the body is
/// form-encoded, then the query string fields.
#[derive(Debug)]
pub struct FormPayload(pub FormValues);

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<AppConfig>::from_ref(state);
        let (parts, body) = req.into_parts();
        let mut values = FormValues::new();

        if is_form_encoded(&parts) {
            let bytes = read_body(body, config.max_form_body_bytes).await?;
            let raw = String::from_utf8_lossy(&bytes);
            parse_into(&mut values, &raw)?;
        }

        if let Some(query) = parts.uri.query() {
            parse_into(&mut values, query)?;
        }

        debug!(fields = values.len(), "Parsed form payload.");
        Ok(FormPayload(values))
    }
}

fn is_form_encoded(parts: &Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

async fn read_body(body: Body, limit: usize) -> Result<axum::body::Bytes, FormError> {
    to_bytes(body, limit)
        .await
        .map_err(|err| FormError::Body(err.to_string()))
}
