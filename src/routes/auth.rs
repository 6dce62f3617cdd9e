use crate::{
    auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenService},
    error::AppError,
    models::{User, UserStore},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns it with the password hash excluded
/// from the response body. Duplicate emails answer 409.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user; the store collapses duplicate-email and other write
    // failures into Conflict
    let register_data = register_data.into_inner();
    let id = users
        .create(&register_data.name, &register_data.email, &password_hash)
        .await?;

    Ok(HttpResponse::Ok().json(User {
        id,
        name: register_data.name,
        email: register_data.email,
        password_hash,
    }))
}

/// Login user
///
/// Authenticates a user and returns a signed token. Unknown email and wrong
/// password answer the same 401 so the response does not reveal which half
/// failed.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = users.find_by_email(&login_data.email).await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => {
            let token = tokens.issue(user.id, &user.email)?;
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
