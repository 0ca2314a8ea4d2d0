//! Authentication primitives: login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, Email, UserValidationError, DISPLAY_NAME_MIN};

/// Minimum accepted password length for signup.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when signup or login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Name was blank or under the minimum length.
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Email failed the basic pattern check.
    InvalidEmail,
    /// Password was blank (login) or under the minimum length (signup).
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort { min } => {
                write!(f, "name must be at least {min} characters")
            }
            Self::InvalidEmail => write!(f, "email address is invalid"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

fn map_email_error(err: UserValidationError) -> AuthValidationError {
    match err {
        UserValidationError::InvalidEmail => AuthValidationError::InvalidEmail,
        // Email::new only returns InvalidEmail today; keep the mapping total.
        _ => AuthValidationError::InvalidEmail,
    }
}

/// Validated login credentials used by the credential issuer.
///
/// ## Invariants
/// - `email` satisfies the basic pattern check.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(map_email_error)?;
        if password.is_empty() {
            return Err(AuthValidationError::PasswordTooShort { min: 1 });
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup details for a credentials-provider account.
///
/// ## Invariants
/// - `name` is at least two characters after trimming.
/// - `email` satisfies the basic pattern check.
/// - `password` is at least [`PASSWORD_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Construct signup details from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name).map_err(|_| AuthValidationError::NameTooShort {
            min: DISPLAY_NAME_MIN,
        })?;
        let email = Email::new(email).map_err(map_email_error)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password to be hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A", "alex@example.com", "secret1", AuthValidationError::NameTooShort { min: 2 })]
    #[case("Alex", "bad-email", "secret1", AuthValidationError::InvalidEmail)]
    #[case("Alex", "alex@example.com", "short", AuthValidationError::PasswordTooShort { min: 6 })]
    fn signup_rejects_invalid_inputs(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = SignupDetails::try_from_parts(name, email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn signup_accepts_minimal_valid_inputs() {
        let details = SignupDetails::try_from_parts("Al", "al@example.com", "secret")
            .expect("valid inputs should succeed");
        assert_eq!(details.name().as_str(), "Al");
        assert_eq!(details.email().as_str(), "al@example.com");
        assert_eq!(details.password(), "secret");
    }

    #[rstest]
    #[case("alex@example.com", "", false)]
    #[case("nope", "pw", false)]
    #[case("alex@example.com", "pw", true)]
    fn login_credential_shape(#[case] email: &str, #[case] password: &str, #[case] ok: bool) {
        assert_eq!(
            LoginCredentials::try_from_parts(email, password).is_ok(),
            ok
        );
    }
}
