#![forbid(unsafe_code)]

//! Inline stylesheets as `data:` URIs.

use base64::{Engine as _, engine::general_purpose::STANDARD};

pub const CSS_DATA_URI_PREFIX: &str = "data:text/css;base64,";

/// Encode `css` (UTF-8) as a `data:text/css;base64,` URI.
#[must_use]
pub fn encode_data_uri(css: &str) -> String {
    let mut uri = String::with_capacity(CSS_DATA_URI_PREFIX.len() + css.len().div_ceil(3) * 4);
    uri.push_str(CSS_DATA_URI_PREFIX);
    STANDARD.encode_string(css.as_bytes(), &mut uri);
    uri
}

/// Inverse of [`encode_data_uri`]. `None` for anything that is not a
/// base64 CSS data URI holding UTF-8.
#[must_use]
pub fn decode_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(CSS_DATA_URI_PREFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}
