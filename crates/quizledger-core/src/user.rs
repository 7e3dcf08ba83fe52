//! Local mock login.
//!
//! There is no credential check: logging in only validates the e-mail shape
//! and creates the [`User`] the ledger stores.

use uuid::Uuid;

use crate::error::LoginError;
use crate::model::{TimestampMs, User};

impl User {
    /// Build a user for a login at `now_ms`.
    ///
    /// With no `name` the display name is the local part of the e-mail.
    pub fn login(email: &str, name: Option<&str>, now_ms: TimestampMs) -> Result<Self, LoginError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginError::MissingEmail);
        }
        if !email.contains('@') {
            return Err(LoginError::InvalidEmail(email.to_string()));
        }

        let name = match name.map(str::trim) {
            Some("") => return Err(LoginError::MissingName),
            Some(name) => name.to_string(),
            None => email.split('@').next().unwrap_or_default().to_string(),
        };

        Ok(User {
            id: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            name,
            login_time: now_ms,
        })
    }
}
