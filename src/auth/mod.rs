//! Authentication and authorization module

pub mod guards;
pub mod jwt;
pub mod password;
pub mod session;

pub use guards::{ensure_not_self, AdminUser, CurrentUser, MaybeUser, SignedInUser};
pub use jwt::{Claims, JwtService, TokenError};
pub use password::PasswordHasher;
pub use session::{extract_token, session_middleware, Session, SessionResolver, TOKEN_COOKIE};
