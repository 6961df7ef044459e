//! Request classification
//!
//! Pure inspectors over an inbound request: whether it is exempt from
//! authentication, which identity it carries, and which access token it
//! presents. No network calls, no request mutation.
//!
//! The inspectors take `Option<&HttpRequest>` so that "no request at all"
//! is a representable, non-panicking input: `None` classifies as public
//! and carries no identity and no token.

use actix_web::HttpRequest;

/// Marks a request as exempt from authentication when set to `"true"`.
pub const HEADER_X_PUBLIC: &str = "x-public";
/// Trusted client identity header, written only after token resolution.
pub const HEADER_X_CLIENT_ID: &str = "x-client-id";
/// Trusted caller identity header, written only after token resolution.
pub const HEADER_X_CALLER_ID: &str = "x-user-id";
/// Query parameter carrying the opaque access token id.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Whether the request is exempt from authentication.
///
/// An absent request is treated as public.
pub fn is_public(request: Option<&HttpRequest>) -> bool {
    match request {
        None => true,
        Some(req) => req
            .headers()
            .get(HEADER_X_PUBLIC)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v == "true"),
    }
}

/// Caller (end user) identity from the trusted `X-User-Id` header.
///
/// Returns `0` when the request is absent, the header is missing, or the
/// value is not a base-10 integer. `0` therefore also reads as "no
/// identity"; callers that must distinguish a real identity of `0` cannot
/// do so through this inspector.
pub fn caller_id(request: Option<&HttpRequest>) -> i64 {
    identity_header(request, HEADER_X_CALLER_ID)
}

/// Client (registered application) identity from the trusted
/// `X-Client-Id` header. Same absence semantics as [`caller_id`].
pub fn client_id(request: Option<&HttpRequest>) -> i64 {
    identity_header(request, HEADER_X_CLIENT_ID)
}

fn identity_header(request: Option<&HttpRequest>, name: &str) -> i64 {
    request
        .and_then(|req| req.headers().get(name))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

/// The access token id presented by the request, if any.
///
/// Reads the `access_token` query parameter and trims surrounding
/// whitespace. `None` means no token was supplied and the request
/// continues as anonymous.
pub fn access_token_id(request: Option<&HttpRequest>) -> Option<String> {
    let query = request?.query_string();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name.as_ref() == PARAM_ACCESS_TOKEN)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}
