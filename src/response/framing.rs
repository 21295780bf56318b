//! Framing resolution at the send boundary.
use super::{body::Coding, state::ResponseState};
use crate::headers::{
    HeaderMap, HeaderValue,
    standard::{CONNECTION, CONTENT_LENGTH, KEEP_ALIVE, TRANSFER_ENCODING},
};
use crate::log::{debug, warning};

/// Returns `true` if `Transfer-Encoding` contains the `chunked` coding.
pub(crate) fn is_chunked(headers: &HeaderMap) -> bool {
    headers
        .get_all(TRANSFER_ENCODING)
        .any(|value| value.contains_token("chunked"))
}

/// Returns the `Content-Length` value if it is a valid length within `i64`.
pub(crate) fn declared_length(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(CONTENT_LENGTH)?.as_str();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok().filter(|&len| len <= i64::MAX as u64)
}

/// Returns the `Transfer-Encoding` codings with `chunked` as the final coding.
fn append_chunked(headers: &HeaderMap) -> HeaderValue {
    let mut codings = String::new();
    for value in headers.get_all(TRANSFER_ENCODING).filter(|v| !v.is_empty()) {
        codings.push_str(value.as_str());
        codings.push_str(", ");
    }
    if codings.is_empty() {
        return HeaderValue::from_static("chunked");
    }
    codings.push_str("chunked");
    HeaderValue::from_string(codings).unwrap_or(HeaderValue::from_static("chunked"))
}

/// Decide the message framing and rewrite framing headers accordingly.
///
/// `closing` is `true` when the response is closed before any body was written, in which case
/// an unspecified body is empty.
///
/// After this returns, at most one of `Content-Length` and `Transfer-Encoding` is present,
/// `Keep-Alive` is absent, and `Connection: close` is present if the body is delimited by
/// connection close.
pub(crate) fn resolve(state: &mut ResponseState, closing: bool) -> Coding {
    let headers = &mut state.headers;

    if headers.remove(KEEP_ALIVE).is_some() {
        warning!("Keep-Alive header is not supported, removed");
    }

    let mut chunked = is_chunked(headers);
    if chunked && !state.peer.supports_chunked() {
        warning!("peer {} cannot parse chunked transfer, removed", state.peer);
        headers.remove(TRANSFER_ENCODING);
        chunked = false;
    }

    let length = declared_length(headers);
    if length.is_none() && headers.remove(CONTENT_LENGTH).is_some() {
        warning!("invalid Content-Length header, removed");
    }

    let coding = if state.status.is_bodyless() {
        Coding::Bodyless
    } else if chunked {
        Coding::Chunked
    } else if let Some(len) = length {
        Coding::ContentLength(len)
    } else if closing {
        Coding::ContentLength(0)
    } else if state.peer.supports_chunked() {
        Coding::Chunked
    } else {
        Coding::CloseDelimited
    };

    match coding {
        Coding::Bodyless => {
            headers.remove(CONTENT_LENGTH);
            headers.remove(TRANSFER_ENCODING);
        }
        Coding::ContentLength(len) => {
            headers.remove(TRANSFER_ENCODING);
            headers.insert(CONTENT_LENGTH, HeaderValue::from_u64(len));
        }
        Coding::Chunked => {
            headers.remove(CONTENT_LENGTH);
            if !chunked {
                let codings = append_chunked(headers);
                headers.insert(TRANSFER_ENCODING, codings);
            }
        }
        Coding::CloseDelimited => {
            headers.remove(CONTENT_LENGTH);
            headers.remove(TRANSFER_ENCODING);
            headers.insert(CONNECTION, HeaderValue::from_static("close"));
        }
    }

    debug!(
        "commit {} {:?}, keep-alive: {}",
        state.status,
        coding,
        state.keep_alive()
    );

    coding
}
