use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskStore},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves all tasks owned by the authenticated user.
///
/// Result ordering is unspecified; clients must not rely on it.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: database failure.
#[get("")]
pub async fn get_tasks(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list_for_user(user.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the caller's verified identity — never taken from the
/// body. `status` defaults to "todo" when unset.
///
/// ## Responses:
/// - `200 OK`: the created `Task`, including its newly assigned id.
/// - `400 Bad Request`: invalid input (e.g. empty title).
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: database failure.
#[post("")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store.create(task_data.into_inner(), user.id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task owned by the authenticated user.
///
/// Matches on `(id, user_id)` in a single statement. A nonexistent id and a
/// task owned by someone else are indistinguishable in the response.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: invalid input.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: no task found or not owned.
/// - `500 Internal Server Error`: database failure.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store
        .update(task_id.into_inner(), task_data.into_inner(), user.id)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: no task found or not owned.
/// - `500 Internal Server Error`: database failure.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    store.delete(task_id.into_inner(), user.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
