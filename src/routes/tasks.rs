use crate::{
    auth::AuthenticatedUser, error::AppError, models::TaskInput, services::TaskService,
};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

fn parse_task_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("invalid task ID".into()))
}

/// Lists every task in store order. No filtering or pagination.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: store failure.
pub async fn get_tasks(tasks: web::Data<TaskService>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(tasks.list().await?))
}

/// Retrieves a task by its sequential id.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `400 Bad Request`: `id` is not a number.
/// - `404 Not Found`: no task with that id.
pub async fn get_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    Ok(HttpResponse::Ok().json(tasks.get_by_id(id).await?))
}

/// Creates a task under the next sequential id. Admin only.
///
/// ## Responses:
/// - `200 OK`: `{"message", "task"}`.
/// - `400 Bad Request`: malformed body, or blank title or description.
/// - `500 Internal Server Error`: store failure, including a lost id race.
pub async fn create_task(
    tasks: web::Data<TaskService>,
    task_data: web::Json<TaskInput>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(task_data.into_inner()).await?;
    log::info!("{} created task {}", caller.username, task.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task created successfully",
        "task": task
    })))
}

/// Replaces title, description, due date and status of a task. Admin only.
///
/// ## Responses:
/// - `200 OK`: `{"message", "task"}` with the updated task.
/// - `400 Bad Request`: non-numeric id, malformed body, or blank fields.
/// - `404 Not Found`: no task with that id.
pub async fn update_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    let task = tasks.update(id, task_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": task
    })))
}

/// Deletes a task. Admin only.
///
/// ## Responses:
/// - `200 OK`: `{"message"}`.
/// - `400 Bad Request`: non-numeric id.
/// - `404 Not Found`: no task with that id.
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    tasks.delete(id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}
