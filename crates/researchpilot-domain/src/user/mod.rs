mod aggregate;
mod repository;
mod value_objects;

pub use aggregate::{validate_password, NewUser, User, MIN_PASSWORD_CHARS};
pub use repository::UserRepository;
pub use value_objects::Email;
