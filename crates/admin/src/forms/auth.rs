//! Login and signup forms.
//!
//! These checks run before the auth gate is touched, so a malformed form never
//! starts the sign-in delay.

use secrecy::{ExposeSecret, SecretString};

use aachar_core::Email;

use crate::services::auth::{AuthError, Credentials, Registration};

/// Login form as submitted.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Check the form and turn it into credentials for the identity provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::MissingField`.
    pub fn into_credentials(self) -> Result<Credentials, AuthError> {
        let email = Email::parse(&self.email)?;
        require_secret("password", &self.password)?;
        Ok(Credentials {
            email,
            password: self.password,
        })
    }
}

/// Signup form as submitted.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Check the form and turn it into a registration request.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField`, `AuthError::InvalidEmail` or
    /// `AuthError::PasswordMismatch`.
    pub fn into_registration(self) -> Result<Registration, AuthError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        let email = Email::parse(&self.email)?;
        require_secret("password", &self.password)?;
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Registration {
            name: name.to_owned(),
            email,
            password: self.password,
        })
    }
}

fn require_secret(field: &'static str, secret: &SecretString) -> Result<(), AuthError> {
    if secret.expose_secret().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_valid() {
        let creds = LoginForm::new(" admin@aachar.in ", "hunter2")
            .into_credentials()
            .unwrap();
        assert_eq!(creds.email.as_str(), "admin@aachar.in");
    }

    #[test]
    fn test_login_form_bad_email() {
        let err = LoginForm::new("admin", "hunter2")
            .into_credentials()
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[test]
    fn test_login_form_missing_password() {
        let err = LoginForm::new("admin@aachar.in", "")
            .into_credentials()
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("password")));
    }

    #[test]
    fn test_signup_requires_name() {
        let err = SignupForm::new("  ", "a@b.in", "pw", "pw")
            .into_registration()
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("name")));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let err = SignupForm::new("Priya", "priya@aachar.in", "pw1", "pw2")
            .into_registration()
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn test_signup_trims_name() {
        let reg = SignupForm::new(" Priya ", "priya@aachar.in", "pw", "pw")
            .into_registration()
            .unwrap();
        assert_eq!(reg.name, "Priya");
    }
}
