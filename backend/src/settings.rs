//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ARTSDAY_*` environment variables, configuration files
//! and command-line flags in OrthoConfig's usual precedence. Session cookie
//! settings are parsed separately, see `inbound::http::session_config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DefaultAdmin, RegistrationPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARTSDAY")]
pub struct AppSettings {
    /// PostgreSQL URL. Without it the service keeps everything in memory.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Username of the administrator seeded at startup.
    pub default_admin_username: Option<String>,
    /// Password of the administrator seeded at startup.
    pub default_admin_password: Option<String>,
    /// Reject registrations once the event's deadline has passed.
    #[ortho_config(default = false)]
    pub enforce_deadline: bool,
    /// Reject registrations once the event has reached its capacity.
    #[ortho_config(default = false)]
    pub enforce_capacity: bool,
}

impl AppSettings {
    /// Database URL, ignoring a blank value.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Account seeded on first start.
    pub fn default_admin(&self) -> DefaultAdmin {
        DefaultAdmin::new(
            self.default_admin_username
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_USERNAME),
            self.default_admin_password
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_PASSWORD),
        )
    }

    /// Which optional registration checks are enabled.
    pub fn registration_policy(&self) -> RegistrationPolicy {
        RegistrationPolicy {
            enforce_deadline: self.enforce_deadline,
            enforce_capacity: self.enforce_capacity,
        }
    }

    /// Whether the built-in administrator password is still in use.
    pub fn uses_default_admin_password(&self) -> bool {
        self.default_admin_password.is_none()
    }
}
