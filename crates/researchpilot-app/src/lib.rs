pub mod application;
pub mod presentation;

pub use presentation::bootstrap::{build_app_state, build_app_state_with_database};
pub use presentation::router::create_router;
