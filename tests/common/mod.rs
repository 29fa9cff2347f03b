#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use task_manager::auth::TokenService;
use task_manager::repositories::{
    MemoryTaskRepository, MemoryUserRepository, TaskRepository, UserRepository,
};
use task_manager::routes::{self, health};
use task_manager::services::{TaskService, UserService};

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "root-password";

/// Services shared by one test's app instance. Tests reach into `users` directly to
/// seed an admin, since no admin exists on a fresh store.
pub struct TestState {
    pub tasks: web::Data<TaskService>,
    pub users: web::Data<UserService>,
    pub tokens: web::Data<TokenService>,
}

pub fn test_state() -> TestState {
    test_state_with(
        Arc::new(MemoryTaskRepository::new()),
        Arc::new(MemoryUserRepository::new()),
    )
}

pub fn test_state_with(
    task_repo: Arc<dyn TaskRepository>,
    user_repo: Arc<dyn UserRepository>,
) -> TestState {
    let tokens = TokenService::new(TEST_SECRET, Duration::hours(24));
    TestState {
        tasks: web::Data::new(TaskService::new(task_repo)),
        users: web::Data::new(UserService::new(user_repo, tokens.clone(), 4)),
        tokens: web::Data::new(tokens),
    }
}

pub fn app(
    state: &TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state.tasks.clone())
        .app_data(state.users.clone())
        .app_data(state.tokens.clone())
        .wrap(Logger::default())
        .service(health::health)
        .configure(routes::config)
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> StatusCode {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await.status()
}

/// Posts to `/login` and returns the status with the parsed JSON body.
pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    assert_eq!(register(app, username, password).await, StatusCode::OK);
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Registers the seed admin, promotes it through the service, and logs it in.
pub async fn admin_token(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    state: &TestState,
) -> String {
    assert_eq!(
        register(app, ADMIN_USERNAME, ADMIN_PASSWORD).await,
        StatusCode::OK
    );
    state
        .users
        .promote(ADMIN_USERNAME)
        .await
        .expect("seed admin can be promoted");
    let (status, body) = login(app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("token {}", token))
}
