#![doc = "The `task_manager` library crate."]
#![doc = ""]
#![doc = "Domain models, password and token handling, the authentication and admin gates,"]
#![doc = "the task and user services with their store backends, and the HTTP route table."]
#![doc = "The binary (`main.rs`) wires these together from `Config`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use crate::error::AppError;
