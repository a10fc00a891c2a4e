//! Administrator login input.
//!
//! Students identify themselves by email alone; only administrators present
//! a password, so only they get a credentials type.

use std::fmt;

use zeroize::Zeroizing;

/// Why an administrator login payload was rejected before any lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Username and password submitted to the admin login form.
///
/// The username is trimmed; the password is kept verbatim and wiped from
/// memory on drop.
///
/// # Examples
/// ```
/// use artsday::domain::AdminCredentials;
///
/// let creds = AdminCredentials::try_from_parts(" admin ", "admin123").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("  ", "pw", CredentialsValidationError::EmptyUsername)]
    #[case("admin", "", CredentialsValidationError::EmptyPassword)]
    fn rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = AdminCredentials::try_from_parts(username, password)
            .expect_err("blank input must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn keeps_password_whitespace() {
        let creds = AdminCredentials::try_from_parts("admin", " secret ").expect("valid input");
        assert_eq!(creds.password(), " secret ");
    }
}
