//! Strict parsing of `application/x-www-form-urlencoded` data.
//!
//! Decoding itself is delegated to `url::form_urlencoded`, which is lenient and
//! passes malformed escapes through untouched. Callers of this module expect a
//! malformed request to be rejected, so each input is validated before it is
//! decoded.

use std::collections::BTreeMap;

use thiserror::Error;
use url::form_urlencoded;

/// Field name to every value submitted for it, in submission order.
pub type FormValues = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid semicolon separator in query")]
    SemicolonSeparator,
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("{0}")]
    Body(String),
}

/// Parses `raw` and appends its values to `values`.
///
/// Nothing is appended when `raw` is rejected.
pub fn parse_into(values: &mut FormValues, raw: &str) -> Result<(), FormError> {
    validate(raw)?;

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    Ok(())
}

/// A `;` anywhere in `raw` outranks every escape problem; otherwise the first
/// bad escape, scanning fields left to right, is reported.
fn validate(raw: &str) -> Result<(), FormError> {
    if raw.split('&').any(|field| field.contains(';')) {
        return Err(FormError::SemicolonSeparator);
    }

    for field in raw.split('&').filter(|field| !field.is_empty()) {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        validate_escapes(key)?;
        validate_escapes(value)?;
    }

    Ok(())
}

fn validate_escapes(component: &str) -> Result<(), FormError> {
    let bytes = component.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        let well_formed = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();

        if !well_formed {
            let end = (i + 3).min(bytes.len());
            let sequence = String::from_utf8_lossy(&bytes[i..end]).into_owned();
            return Err(FormError::InvalidEscape(sequence));
        }

        i += 3;
    }

    Ok(())
}
