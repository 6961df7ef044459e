//! Failure taxonomy for token resolution

use rest_errors::RestErr;
use thiserror::Error;

/// Result type alias for token resolution.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Why a token lookup did not produce an identity.
///
/// Never retried and never recovered locally; every variant propagates to
/// the caller of `authenticate_request`, which decides how to answer the
/// original client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token service could not be reached, timed out, or returned a
    /// response with no usable body. Infrastructure outage.
    #[error("token service unavailable: {0}")]
    RemoteUnavailable(String),

    /// The token service explicitly declined the token (invalid, expired,
    /// unknown). Carries the remote error verbatim for faithful
    /// propagation.
    #[error("token rejected: {0}")]
    RemoteRejected(RestErr),

    /// A response body, success or error, did not match the expected
    /// shape. Contract violation between services.
    #[error("invalid token service response: {0}")]
    Decode(String),
}

impl From<AuthError> for RestErr {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::RemoteRejected(rest_err) => rest_err,
            AuthError::RemoteUnavailable(_) => RestErr::internal_server_error(
                "invalid token service response while resolving access token",
            ),
            AuthError::Decode(_) => {
                RestErr::internal_server_error("error while parsing token service response")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_propagates_the_remote_error_verbatim() {
        let remote = RestErr::not_found("token not found");
        let rest: RestErr = AuthError::RemoteRejected(remote.clone()).into();
        assert_eq!(rest, remote);
    }

    #[test]
    fn infrastructure_failures_map_to_internal_server_error() {
        let rest: RestErr = AuthError::RemoteUnavailable("connection refused".into()).into();
        assert_eq!(rest.status, 500);

        let rest: RestErr = AuthError::Decode("expected object".into()).into();
        assert_eq!(rest.status, 500);
    }
}
