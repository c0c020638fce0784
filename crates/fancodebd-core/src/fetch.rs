//! Feed retrieval.
//!
//! Uses the curl crate (libcurl) for a single GET of the JSON feed. No custom
//! headers and no timeout overrides: libcurl defaults apply.

use serde_json::Value;

use crate::error::FetchError;

/// GET `url` and decode the body as a JSON document.
///
/// Follows redirects. Any non-2xx final status is an error, as is a body that
/// does not parse as JSON. Runs in the current thread.
pub fn fetch_document(url: &str) -> Result<Value, FetchError> {
    check_source_url(url)?;
    let body = fetch_body(url)?;
    tracing::debug!(url, bytes = body.len(), "feed downloaded");
    decode_document(&body)
}

/// Decode a response body into a document.
pub fn decode_document(body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(FetchError::Decode)
}

/// Accept only absolute `http`/`https` URLs.
pub fn check_source_url(url: &str) -> Result<(), FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = ::url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("scheme {} is not http or https", other))),
    }
}

fn fetch_body(url: &str) -> Result<Vec<u8>, FetchError> {
    let transfer_err = |source: curl::Error| FetchError::Transfer {
        url: url.to_string(),
        source,
    };

    let mut body: Vec<u8> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transfer_err)?;
    easy.get(true).map_err(transfer_err)?;
    easy.follow_location(true).map_err(transfer_err)?;
    easy.max_redirections(10).map_err(transfer_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transfer_err)?;
        transfer.perform().map_err(transfer_err)?;
    }

    let code = easy.response_code().map_err(transfer_err)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Status {
            url: url.to_string(),
            code,
        });
    }
    Ok(body)
}
