//! Bootstrap admin account
//!
//! Registration never grants the admin role, so the first admin is created
//! at startup from `ADMIN_EMAIL` / `ADMIN_PASSWORD` (and optionally
//! `ADMIN_USERNAME`). Both required variables unset means no seeding.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

pub const ADMIN_EMAIL_VAR: &str = "ADMIN_EMAIL";
pub const ADMIN_PASSWORD_VAR: &str = "ADMIN_PASSWORD";
pub const ADMIN_USERNAME_VAR: &str = "ADMIN_USERNAME";

#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FromEnv for AdminSeed {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            username: env_or_default(ADMIN_USERNAME_VAR, "admin"),
            email: env_required(ADMIN_EMAIL_VAR)?,
            password: env_required(ADMIN_PASSWORD_VAR)?,
        })
    }
}

impl AdminSeed {
    /// `None` when no admin is configured
    pub fn from_env_optional() -> Option<Self> {
        match Self::from_env() {
            Ok(seed) => Some(seed),
            Err(e) => {
                tracing::debug!(error = %e, "Admin seed not configured");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reads_env() {
        temp_env::with_vars(
            [
                (ADMIN_EMAIL_VAR, Some("root@shop.test")),
                (ADMIN_PASSWORD_VAR, Some("supersecret")),
                (ADMIN_USERNAME_VAR, None),
            ],
            || {
                let seed = AdminSeed::from_env().unwrap();
                assert_eq!(seed.email, "root@shop.test");
                assert_eq!(seed.username, "admin");
                assert!(!format!("{seed:?}").contains("supersecret"));
            },
        );
    }

    #[test]
    fn test_seed_absent_without_password() {
        temp_env::with_vars(
            [
                (ADMIN_EMAIL_VAR, Some("root@shop.test")),
                (ADMIN_PASSWORD_VAR, None),
            ],
            || assert!(AdminSeed::from_env_optional().is_none()),
        );
    }
}
