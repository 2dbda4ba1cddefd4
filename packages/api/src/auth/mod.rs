//! Authentication: password hashing, session keys, and role checks.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{
    current_user, require_role, require_user, SESSION_IMPERSONATOR_KEY, SESSION_USER_ID_KEY,
};
