pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{web, Scope};

use crate::auth::{AuthMiddleware, TokenService};

/// Builds the `/api` route tree.
///
/// Register and login sit outside the authenticated scope; every task route
/// is gated by `AuthMiddleware`, built with the same `TokenService` the login
/// handler signs with.
pub fn api(tokens: TokenService) -> Scope {
    web::scope("/api")
        .service(health::ping)
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(tokens))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
}
