//! The backend's JSON wrapping convention.
//!
//! Success is `{ "data": <payload> }`; failure is a non-2xx status with
//! `{ "message": <string> }` (possibly alongside other fields). Absent or
//! `null` `data` means "empty result", never an error.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Success wrapper used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Error wrapper delivered with a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Unwraps `data` from a success body. An empty body, a missing `data` field
/// and `data: null` all decode to `None`.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the body is present but does not parse as
/// the expected envelope shape.
pub(crate) fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, Error> {
    if body.is_empty() {
        return Ok(None);
    }
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.data)
}

/// Maps a non-2xx authenticated response to the error taxonomy: 401 is
/// session expiry; any other 4xx with a server `message` is surfaced
/// verbatim; everything else is a fault.
pub(crate) fn classify_error(status: StatusCode, body: &[u8]) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::SessionExpired;
    }
    rejection(status, body)
}

/// Same mapping for unauthenticated calls (login, register), where a 401 is
/// an ordinary rejection rather than an expired session.
pub(crate) fn classify_public_error(status: StatusCode, body: &[u8]) -> Error {
    rejection(status, body)
}

fn rejection(status: StatusCode, body: &[u8]) -> Error {
    if status.is_client_error() {
        if let Ok(ErrorBody { message: Some(message) }) = serde_json::from_slice::<ErrorBody>(body)
        {
            if !message.trim().is_empty() {
                return Error::Rejected {
                    status: status.as_u16(),
                    message,
                };
            }
        }
    }
    Error::Fault {
        status: status.as_u16(),
    }
}
