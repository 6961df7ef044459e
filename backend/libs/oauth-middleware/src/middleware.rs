//! Actix middleware enforcing access-token authentication
//!
//! Public requests (`X-Public: true`) bypass resolution entirely; every
//! other request goes through [`TokenResolver::authenticate_request`].
//! Failures are answered in the shared wire error format.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures::future::{ready, Ready};
use tracing::warn;

use crate::classifier::is_public;
use crate::resolver::TokenResolver;
use rest_errors::RestErr;

/// Access-token authentication middleware.
///
/// ```ignore
/// let resolver = TokenResolver::new(&OAuthSettings::from_env()?)?;
/// let app = App::new()
///     .wrap(OAuthMiddleware::new(resolver))
///     .service(routes());
/// ```
pub struct OAuthMiddleware {
    resolver: TokenResolver,
}

impl OAuthMiddleware {
    pub fn new(resolver: TokenResolver) -> Self {
        Self { resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = OAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OAuthMiddlewareService {
            service: Rc::new(service),
            resolver: self.resolver.clone(),
        }))
    }
}

pub struct OAuthMiddlewareService<S> {
    service: Rc<S>,
    resolver: TokenResolver,
}

impl<S, B> Service<ServiceRequest> for OAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let resolver = self.resolver.clone();

        Box::pin(async move {
            // The resolver itself does not special-case public requests;
            // exemption is decided here, at the host.
            if is_public(Some(req.request())) {
                return service.call(req).await;
            }

            if let Err(err) = resolver.authenticate_request(&mut req).await {
                warn!("request authentication failed: {err}");
                return Err(RestErr::from(err).into());
            }

            service.call(req).await
        })
    }
}
