use serde::{Deserialize, Serialize};

/// The signed-in operator, as carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Email address of the operator account.
    pub email: String,
}

/// The admin panel's authentication state machine.
///
/// There are exactly two states. Transitions are driven by re-querying the
/// session after a login or logout settles, never by the login form's own
/// success path directly.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Panel hidden, sign-in modal shown.
    SignedOut,
    /// Panel shown, settings loaded, merchant subscription active.
    SignedIn(AdminUser),
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    pub fn user(&self) -> Option<&AdminUser> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            AuthState::SignedOut => None,
        }
    }
}

/// Login request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AdminUser,
}
