use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use taskdeck::auth::TokenService;
use taskdeck::models::{TaskStore, UserStore};
use taskdeck::routes;

const TEST_SECRET: &str = "integration-test-secret";

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory test DB");
    taskdeck::db::init_schema(&pool)
        .await
        .expect("Failed to create schema in test DB");
    pool
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let pool = test_pool().await;
    let tokens = TokenService::new(TEST_SECRET);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(UserStore::new(pool.clone())))
            .app_data(web::Data::new(TaskStore::new(pool.clone())))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::api(tokens)),
    )
    .await;

    // Ping is reachable without credentials
    let req_ping = test::TestRequest::get().uri("/api/ping").to_request();
    let resp_ping = test::call_service(&app, req_ping).await;
    assert_eq!(resp_ping.status(), actix_web::http::StatusCode::OK);
    let ping_body = test::read_body(resp_ping).await;
    assert_eq!(ping_body, "pong");

    // Register a new user
    let register_payload = json!({
        "name": "Integration User",
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::OK,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    // The user payload carries id/name/email and never the hash
    let user: serde_json::Value =
        serde_json::from_slice(&body_bytes).expect("Failed to parse registration response");
    assert_eq!(user["id"], 1);
    assert_eq!(user["name"], "Integration User");
    assert_eq!(user["email"], "integration@example.com");
    assert!(
        user.get("password_hash").is_none() && user.get("password").is_none(),
        "registration response must not expose the password hash: {}",
        user
    );

    // Registering the same email again fails with a conflict
    let req_conflict = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(
        resp_conflict.status(),
        actix_web::http::StatusCode::CONFLICT,
        "Duplicate registration did not fail as expected"
    );

    // Login with the registered credentials
    let login_payload = json!({
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    let status_login = resp_login.status();
    let body_bytes_login = test::read_body(resp_login).await;
    assert_eq!(
        status_login,
        actix_web::http::StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes_login)
    );

    let login_response: taskdeck::auth::AuthResponse =
        serde_json::from_slice(&body_bytes_login).expect("Failed to parse login response JSON");
    let token = login_response.token;
    assert!(!token.is_empty(), "Token should be a non-empty string");

    // The token opens the protected task scope
    let req_create = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({ "title": "Task created by token test" }))
        .to_request();
    let resp_create = test::call_service(&app, req_create).await;
    assert_eq!(resp_create.status(), actix_web::http::StatusCode::OK);

    // Wrong password and unknown email both answer 401
    let req_bad_pw = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "integration@example.com",
            "password": "WrongPassword1"
        }))
        .to_request();
    let resp_bad_pw = test::call_service(&app, req_bad_pw).await;
    assert_eq!(
        resp_bad_pw.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );

    let req_unknown = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "nobody@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp_unknown = test::call_service(&app, req_unknown).await;
    assert_eq!(
        resp_unknown.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
}

#[actix_rt::test]
async fn test_register_rejects_invalid_bodies() {
    let pool = test_pool().await;
    let tokens = TokenService::new(TEST_SECRET);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(UserStore::new(pool.clone())))
            .app_data(web::Data::new(TaskStore::new(pool.clone())))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(Logger::default())
            .service(routes::api(tokens)),
    )
    .await;

    // Invalid email format
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "test",
            "email": "not-an-email",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Password too short
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "test",
            "email": "test@example.com",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Undecodable body (missing required fields)
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "test@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_login_rejects_invalid_bodies() {
    let pool = test_pool().await;
    let tokens = TokenService::new(TEST_SECRET);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(UserStore::new(pool.clone())))
            .app_data(web::Data::new(TaskStore::new(pool.clone())))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(Logger::default())
            .service(routes::api(tokens)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "not-an-email",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}
