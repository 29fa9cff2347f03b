pub mod task;
pub mod user;

pub use task::{TaskError, TaskService};
pub use user::{UserError, UserService};
