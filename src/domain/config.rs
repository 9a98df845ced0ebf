use std::{num::NonZeroU32, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for the booking console.
///
/// Every setting has a default, so the configuration file is optional and may
/// list only the settings that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The prefix of generated ticket identifiers.
    ///
    /// For example, 'tick' produces identifiers like 'tick001'.
    id_prefix: String,

    /// The number of digits in generated ticket identifiers.
    ///
    /// Numbers are padded to this width with leading zeros.
    digits: usize,

    /// The number of failed admin logins allowed before admin access is locked
    /// for the rest of the session. Zero is rejected when the file is parsed.
    max_login_attempts: NonZeroU32,

    /// The admin username. Compared case-insensitively.
    admin_username: String,

    /// The admin password. Compared exactly.
    admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            digits: default_digits(),
            max_login_attempts: default_max_login_attempts(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the prefix of generated ticket identifiers.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Returns the number of digits for padding ticket numbers.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.digits
    }

    /// Returns the number of admin login attempts allowed per session.
    #[must_use]
    pub const fn max_login_attempts(&self) -> NonZeroU32 {
        self.max_login_attempts
    }

    /// Returns the admin username.
    #[must_use]
    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    /// Returns the admin password.
    #[must_use]
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }
}

fn default_id_prefix() -> String {
    "tick".to_string()
}

const fn default_digits() -> usize {
    3
}

const fn default_max_login_attempts() -> NonZeroU32 {
    NonZeroU32::new(5).unwrap()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123123".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_id_prefix")]
        id_prefix: String,

        #[serde(default = "default_digits")]
        digits: usize,

        #[serde(default = "default_max_login_attempts")]
        max_login_attempts: NonZeroU32,

        #[serde(default = "default_admin_username")]
        admin_username: String,

        #[serde(default = "default_admin_password")]
        admin_password: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                id_prefix,
                digits,
                max_login_attempts,
                admin_username,
                admin_password,
            } => Self {
                id_prefix,
                digits,
                max_login_attempts,
                admin_username,
                admin_password,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            id_prefix: config.id_prefix,
            digits: config.digits,
            max_login_attempts: config.max_login_attempts,
            admin_username: config.admin_username,
            admin_password: config.admin_password,
        }
    }
}
