//! Session authentication: token issue/verify and password hashing.

pub mod extractor;
pub mod password;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use password::PasswordHashing;
pub use token::{Claims, TokenAuthority};
