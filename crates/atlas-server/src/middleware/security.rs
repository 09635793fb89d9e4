//! Response headers for a JSON-only API.
//!
//! Nothing served here is meant to be rendered or framed by a browser, so
//! every response carries a locked-down policy.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
pub(crate) const CSP: &str = "default-src 'none'; frame-ancestors 'none'";

/// Headers set on every response, overriding handler values.
pub(crate) const HEADERS: [(&str, &str); 4] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// Layer that sets one header from [`HEADERS`].
pub(crate) fn header_layer(
    (name, value): (&'static str, &'static str),
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}
