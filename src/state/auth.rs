//! Bearer-credential state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login happens outside this client and leaves a credential triple in
//! storage: access token, role, full name. This module reads that triple on
//! app mount (identity resolution and authenticated gateway calls consume
//! it) and clears it on explicit logout. Nothing here ever writes a
//! credential.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::storage::backend::StorageBackend;

/// Storage key for the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "classpulse_access_token";
/// Storage key for the account role.
pub const ROLE_KEY: &str = "classpulse_role";
/// Storage key for the account's display name.
pub const FULL_NAME_KEY: &str = "classpulse_full_name";

/// Account role stored alongside the credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// Parse the stored role string; unknown values read as no role.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// One logged-in account, as left behind by the login flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token attached to authenticated gateway calls.
    pub access_token: String,
    /// Stored role, when recognized.
    pub role: Option<Role>,
    /// Display name for greetings; may be empty for older credentials.
    pub full_name: String,
}

/// Authentication state provided app-wide via context.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<AuthSession>,
}

impl AuthState {
    /// Read the credential triple out of storage.
    ///
    /// A missing or blank token reads as logged out; role and name are
    /// best-effort extras on top of it.
    #[must_use]
    pub fn load(storage: &impl StorageBackend) -> Self {
        let access_token = storage.read(ACCESS_TOKEN_KEY).unwrap_or_default();
        if access_token.trim().is_empty() {
            return Self::default();
        }
        let role = storage.read(ROLE_KEY).as_deref().and_then(Role::parse);
        let full_name = storage.read(FULL_NAME_KEY).unwrap_or_default();
        Self {
            session: Some(AuthSession {
                access_token,
                role,
                full_name,
            }),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The bearer token, when logged in.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
    }

    /// Whether the stored role marks this account as a teacher.
    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.role == Some(Role::Teacher))
    }
}

/// Drop the credential triple — explicit logout.
pub fn clear_credentials(storage: &impl StorageBackend) {
    storage.remove(ACCESS_TOKEN_KEY);
    storage.remove(ROLE_KEY);
    storage.remove(FULL_NAME_KEY);
}
