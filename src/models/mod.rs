pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskStore};
pub use user::{User, UserStore};
