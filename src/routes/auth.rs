use crate::{
    auth::{AuthResponse, AuthenticatedUser, LoginRequest, RegisterRequest},
    error::AppError,
    services::UserService,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Creates a credential with role `user`. Does not log the user in.
///
/// ## Responses:
/// - `200 OK`: `{"message": "User registered successfully"}`.
/// - `400 Bad Request`: malformed body, blank username or password, or the username
///   is already taken.
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    users.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully"
    })))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{"token": "<jwt>"}`; send it back as `Authorization: token <jwt>`.
/// - `401 Unauthorized`: `{"error": "invalid credentials"}` for an unknown username
///   and for a wrong password alike.
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = users
        .login(&login_data.username, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

/// Promote a user to `Admin`. Admin only.
///
/// The promoted user's existing tokens keep their old role until they log in again.
pub async fn promote(
    users: web::Data<UserService>,
    username: web::Path<String>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let username = username.into_inner();
    users.promote(&username).await?;
    log::info!("{} promoted {}", caller.username, username);

    Ok(HttpResponse::Ok().json(json!({
        "message": "User promoted to admin"
    })))
}
