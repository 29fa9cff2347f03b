use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;

use task_manager::auth::TokenService;
use task_manager::config::Config;
use task_manager::repositories::{
    postgres, MemoryTaskRepository, MemoryUserRepository, PgTaskRepository, PgUserRepository,
    TaskRepository, UserRepository,
};
use task_manager::routes::{self, health};
use task_manager::services::{TaskService, UserService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let (task_repo, user_repo): (Arc<dyn TaskRepository>, Arc<dyn UserRepository>) =
        match &config.database_url {
            Some(url) => {
                let pool = postgres::init_pool(url)
                    .await
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
                log::info!("Using PostgreSQL store");
                (
                    Arc::new(PgTaskRepository::new(pool.clone())),
                    Arc::new(PgUserRepository::new(pool)),
                )
            }
            None => {
                log::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
                (
                    Arc::new(MemoryTaskRepository::new()),
                    Arc::new(MemoryUserRepository::new()),
                )
            }
        };

    let tokens = TokenService::new(
        config.jwt_secret.as_bytes(),
        Duration::hours(config.token_ttl_hours),
    );
    let task_service = web::Data::new(TaskService::new(task_repo));
    let user_service = web::Data::new(UserService::new(
        user_repo,
        tokens.clone(),
        config.bcrypt_cost,
    ));
    let tokens = web::Data::new(tokens);

    log::info!("Starting task manager at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(task_service.clone())
            .app_data(user_service.clone())
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
