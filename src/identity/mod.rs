//! Identity & session adapter.
//!
//! Owns the password column of `profiles` and the process-wide current
//! session. The session is a single slot: signing up or signing in as
//! anyone displaces whoever was active before, which is why operations
//! that provision identities on behalf of another user must snapshot and
//! restore around the switch (see the facade's `add_mentee`).

pub mod adapter;

pub use adapter::IdentityAdapter;

use crate::config::LOGIN_DOMAIN;
use crate::entities::sea_orm_active_enums::RoleEnum;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub role: RoleEnum,
    pub access_token: String,
}

/// The identity layer keys accounts by an email-shaped address derived
/// from the username. Existing accounts were created under this scheme,
/// so it is preserved bit-for-bit.
pub fn login_address(username: &str) -> String {
    format!("{username}@{LOGIN_DOMAIN}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_address_is_stable() {
        assert_eq!(login_address("ravi"), "ravi@mentorlink.local");
    }

    #[test]
    fn login_address_is_case_sensitive() {
        assert_ne!(login_address("Ravi"), login_address("ravi"));
    }
}
