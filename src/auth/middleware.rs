use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenService;

/// Gates a scope behind bearer-token authentication.
///
/// Constructed with the `TokenService` so verification uses the same keys the
/// rest of the application was started with. Applied to the task scope only;
/// register and login live outside it and are never intercepted.
pub struct AuthMiddleware {
    tokens: TokenService,
}

impl AuthMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match auth_header {
            Some(token) => {
                match self.tokens.verify(token) {
                    Ok(claims) => {
                        // The verified identity is trusted for the rest of the
                        // request's lifetime; handlers pick it up through the
                        // AuthenticatedUser extractor.
                        req.extensions_mut().insert(AuthenticatedUser {
                            id: claims.sub,
                            email: claims.email,
                        });
                        let fut = self.service.call(req);
                        Box::pin(fut)
                    }
                    Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
                }
            }
            None => {
                let app_err = crate::error::AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
