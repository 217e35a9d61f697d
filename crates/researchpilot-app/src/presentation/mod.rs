pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
