use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The verified identity of the caller, extracted from request extensions.
///
/// `AuthMiddleware` validates the bearer token and inserts this value; taking
/// it as a handler parameter threads the identity through the signature with
/// no runtime downcast of an untyped context entry.
///
/// If the value is missing (the middleware did not run, or failed to insert
/// it), the extractor returns `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                let err = AppError::Unauthorized(
                    "Authenticated user not found in request. Ensure AuthMiddleware is active."
                        .to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
