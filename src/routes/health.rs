use actix_web::{get, HttpResponse, Responder};

/// Liveness probe endpoint. Answers without credentials.
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}
