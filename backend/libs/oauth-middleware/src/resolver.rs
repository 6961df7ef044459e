//! Access token resolution
//!
//! One remote lookup per token-carrying request: the opaque token id from
//! the query string is exchanged at the token service for a caller/client
//! identity pair, which is then written into the request's trusted
//! identity headers.
//!
//! ## Trust hygiene
//!
//! `X-Client-Id` and `X-User-Id` arrive on the wire like any other header,
//! so a caller could set them directly. The resolver removes both before
//! the lookup is issued. The removal is unconditional, not tied to the
//! outcome: a rejected, failed, or abandoned resolution leaves the request
//! with no identity headers at all.

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::classifier::{access_token_id, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID};
use crate::config::OAuthSettings;
use crate::error::{AuthError, Result};
use rest_errors::RestErr;

/// Identity resolved from an access token id.
///
/// Constructed solely by decoding the token service's success response;
/// lives for the duration of one request and is never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}

/// Client for the token service.
///
/// Holds a `reqwest::Client` built once with the configured timeout.
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    http: Client,
    base_url: String,
}

impl TokenResolver {
    /// Build a resolver from process-wide settings.
    pub fn new(settings: &OAuthSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("failed to build token service HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the request's access token, if any, into trusted identity
    /// headers.
    ///
    /// Requests without a token pass through untouched and continue as
    /// anonymous. Requests with a token first have any pre-existing
    /// identity headers removed, then `X-Client-Id` and `X-User-Id` are
    /// written back only from a successful resolution.
    ///
    /// `Ok(())` is the only proceed signal; every failure is returned to
    /// the caller undecorated. Dropping the returned future aborts the
    /// in-flight lookup.
    pub async fn authenticate_request(&self, request: &mut ServiceRequest) -> Result<()> {
        let token_id = match access_token_id(Some(request.request())) {
            Some(token_id) => token_id,
            None => {
                debug!("no access token on request, continuing as anonymous");
                return Ok(());
            }
        };

        scrub_identity_headers(request.headers_mut());

        let token = self.get_access_token(&token_id).await?;

        let headers = request.headers_mut();
        headers.insert(
            HeaderName::from_static(HEADER_X_CLIENT_ID),
            HeaderValue::from(token.client_id),
        );
        headers.insert(
            HeaderName::from_static(HEADER_X_CALLER_ID),
            HeaderValue::from(token.user_id),
        );

        Ok(())
    }

    /// Single remote lookup: `GET {base_url}/oauth/access_token/{id}`.
    ///
    /// Status at or below 299 decodes as an [`AccessToken`]; anything
    /// above decodes as the remote's wire error and surfaces as
    /// [`AuthError::RemoteRejected`].
    async fn get_access_token(&self, token_id: &str) -> Result<AccessToken> {
        let url = format!("{}/oauth/access_token/{}", self.base_url, token_id);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("token service request failed: {e}");
            AuthError::RemoteUnavailable(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("token service response had no usable body: {e}");
            AuthError::RemoteUnavailable(e.to_string())
        })?;

        if status.as_u16() > 299 {
            let rest_err: RestErr = serde_json::from_slice(&body)
                .map_err(|e| AuthError::Decode(format!("error body: {e}")))?;
            warn!(status = rest_err.status, "token service rejected access token");
            return Err(AuthError::RemoteRejected(rest_err));
        }

        serde_json::from_slice(&body)
            .map_err(|e| AuthError::Decode(format!("access token body: {e}")))
    }
}

/// Remove the caller-settable identity headers from a request.
pub(crate) fn scrub_identity_headers(headers: &mut HeaderMap) {
    headers.remove(HEADER_X_CLIENT_ID);
    headers.remove(HEADER_X_CALLER_ID);
}
