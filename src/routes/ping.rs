//! # Echo Handler
//!
//! Reflects the request back to the caller: the request target, every form
//! field, every header and the caller's apparent address.

use std::collections::BTreeMap;

use axum::{
    extract::OriginalUri,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{
    errors::api_error::ApiError,
    extractors::{client_addr::ClientAddr, form_extractor::FormPayload},
    utils::{form_values::FormValues, header_case::collect_headers},
};

/// Body of a successful `/ping` response.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct EchoResponse {
    #[serde(rename = "reqUrl")]
    pub request_uri: String,
    pub payload: FormValues,
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(rename = "clientIP")]
    pub client_ip: String,
}

/// Axum handler for `GET /ping`.
///
/// # Errors
/// - `400 Bad Request` with a plain-text reason when the query string or a
///   form-encoded body is malformed.
/// - `500 Internal Server Error` if the echo cannot be serialized. The body
///   is serialized before any status is committed, so a failure never yields
///   a partial `200`.
pub async fn ping(
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ClientAddr(client_ip): ClientAddr,
    FormPayload(payload): FormPayload,
) -> Result<Response, ApiError> {
    let response = EchoResponse {
        request_uri: uri.to_string(),
        payload,
        headers: collect_headers(&headers),
        client_ip,
    };

    debug!(
        req_url = %response.request_uri,
        client_ip = %response.client_ip,
        fields = response.payload.len(),
        "Echoing request."
    );

    let body = serde_json::to_vec(&response).map_err(|err| {
        error!(error = %err, "Error encoding response.");
        ApiError::InternalServerError
    })?;

    Ok((
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
