//! Authentication wire contracts.
//!
//! These types define the data shapes exchanged with the external
//! authentication collaborator. Token issuance and verification live there;
//! this module specifies no behavior, only the JSON contracts (camelCase on
//! the wire, matching the deployed auth service).

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::status::UserRole;

/// Claims carried in a verified JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtPayload {
    /// Subject user ID.
    pub user_id: UserId,
    /// Subject email.
    pub email: Email,
    /// Marketplace role.
    pub role: UserRole,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// The authenticated identity attached to a request after verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// User ID.
    pub user_id: UserId,
    /// User email.
    pub email: Email,
    /// Marketplace role.
    pub role: UserRole,
}

impl From<JwtPayload> for AuthUser {
    fn from(payload: JwtPayload) -> Self {
        Self {
            user_id: payload.user_id,
            email: payload.email,
            role: payload.role,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: Email,
    /// Plaintext password, verified by the auth collaborator.
    pub password: String,
}

/// Registration request body: login credentials plus profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    /// Account email.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Successful login/registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user's profile summary.
    pub user: AuthUserSummary,
    /// Signed JWT for subsequent requests.
    pub token: String,
}

/// User profile summary embedded in [`AuthResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserSummary {
    /// User ID.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Marketplace role.
    pub role: UserRole,
}
