use crate::domain::Config;

/// A policy deciding whether a username and password grant admin access.
pub trait Credentials {
    /// Returns `true` if the pair is accepted.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single admin account.
///
/// The username is matched case-insensitively and the password exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    /// Creates a policy accepting exactly one account.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a policy for the admin account named in the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admin_username(), config.admin_password())
    }
}

impl Credentials for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username.to_lowercase() == self.username.to_lowercase() && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("admin", "admin123123", true; "exact")]
    #[test_case("ADMIN", "admin123123", true; "username ignores case")]
    #[test_case("Admin", "ADMIN123123", false; "password is case sensitive")]
    #[test_case("root", "admin123123", false; "wrong username")]
    #[test_case("admin", "", false; "empty password")]
    fn default_account(username: &str, password: &str, accepted: bool) {
        let credentials = StaticCredentials::from_config(&Config::default());
        assert_eq!(credentials.verify(username, password), accepted);
    }
}
