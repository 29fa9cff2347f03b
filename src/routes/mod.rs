pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::{AdminOnly, AuthMiddleware};
use crate::error::AppError;

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body on {}: {}", req.path(), err);
    AppError::BadRequest("invalid data".into()).into()
}

/// Registers every API route.
///
/// Expects `web::Data` for `TaskService`, `UserService` and `TokenService` in app data.
/// Authentication wraps outside the admin gate on every admin route.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(auth::register)
        .service(auth::login)
        .service(
            web::resource("/promote/{username}").route(
                web::post()
                    .to(auth::promote)
                    .wrap(AdminOnly)
                    .wrap(AuthMiddleware),
            ),
        )
        .service(
            web::resource("/tasks")
                .route(web::get().to(tasks::get_tasks).wrap(AuthMiddleware))
                .route(
                    web::post()
                        .to(tasks::create_task)
                        .wrap(AdminOnly)
                        .wrap(AuthMiddleware),
                ),
        )
        .service(
            web::resource("/tasks/{id}")
                .route(web::get().to(tasks::get_task).wrap(AuthMiddleware))
                .route(
                    web::put()
                        .to(tasks::update_task)
                        .wrap(AdminOnly)
                        .wrap(AuthMiddleware),
                )
                .route(
                    web::delete()
                        .to(tasks::delete_task)
                        .wrap(AdminOnly)
                        .wrap(AuthMiddleware),
                ),
        );
}
