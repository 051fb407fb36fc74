//! Transport module - HTTP clients the access layer runs on.
//!
//! `NetworkHttpClient` talks to a registry over the network;
//! `OneshotHttpClient` (feature "in-process") calls an axum `Router` in
//! memory. Both decode bodies through [`decode_body`].

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;

use ::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

/// Error body of a registry endpoint (the envelope without data)
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    status: u16,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a response body.
///
/// Non-2xx responses carrying an envelope surface its message; anything
/// else falls back to a status based error. An empty 2xx body is read as
/// JSON `null`.
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ClientResult<T> {
    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            let code = if envelope.status == shared::response::STATUS_OK {
                status.as_u16()
            } else {
                envelope.status
            };
            return Err(ClientError::api(code, envelope.message));
        }
        let text = String::from_utf8_lossy(body).to_string();
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::api(400, Some(text))),
            _ => Err(ClientError::Internal(text)),
        };
    }

    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
