mod aggregate;
mod repository;
mod stats;
mod value_objects;


pub use aggregate::{NewTask, Task, TaskChanges};
pub use repository::{TaskFilter, TaskRepository};
pub use stats::{sort_for_listing, TaskStats};
pub use value_objects::TaskStatus;
