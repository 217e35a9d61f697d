mod password;
mod token;

pub use password::{PasswordError, PasswordService};
pub use token::{TokenClaims, TokenError, TokenKind, TokenPair, TokenService};
