pub mod filter;
pub mod todo;
pub mod user;

pub use filter::{filter_tasks, PriorityFilter, TaskFilter, TaskStats};
pub use todo::{CreateTodo, Draft, Priority, Todo, UpdateTodo};
pub use user::{AuthResponse, User};
