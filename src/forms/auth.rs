use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::forms::sanitize_inline_text;

const NAME_MAX_LEN: u64 = 128;
const PASSWORD_MIN_LEN: u64 = 8;

pub type AuthFormResult<T> = Result<T, AuthFormError>;

#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name cannot be empty")]
    EmptyName,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Form payload emitted by the login page.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    pub fn sanitized(self) -> AuthFormResult<(String, String)> {
        self.validate()?;
        Ok((self.email.trim().to_lowercase(), self.password))
    }
}

/// Form payload emitted by the registration page.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = PASSWORD_MIN_LEN))]
    pub password: String,
    pub password_confirmation: String,
}

/// Registration data after validation, before password hashing.
#[derive(Debug)]
pub struct RegistrationData {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

impl RegisterForm {
    pub fn into_registration(self) -> AuthFormResult<RegistrationData> {
        self.validate()?;

        if self.password != self.password_confirmation {
            return Err(AuthFormError::PasswordMismatch);
        }

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(AuthFormError::EmptyName);
        }

        let phone = self
            .phone
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        Ok(RegistrationData {
            name,
            email: self.email.trim().to_lowercase(),
            phone,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_lowercases_email() {
        let form = RegisterForm {
            name: " Ama  Mensah ".to_string(),
            email: "Ama@Example.COM".to_string(),
            phone: Some("  ".to_string()),
            password: "correcthorse".to_string(),
            password_confirmation: "correcthorse".to_string(),
        };

        let data = form.into_registration().expect("valid form");
        assert_eq!(data.name, "Ama Mensah");
        assert_eq!(data.email, "ama@example.com");
        assert!(data.phone.is_none());
    }

    #[test]
    fn register_form_rejects_mismatched_passwords() {
        let form = RegisterForm {
            name: "Ama".to_string(),
            email: "ama@example.com".to_string(),
            phone: None,
            password: "correcthorse".to_string(),
            password_confirmation: "battery".to_string(),
        };

        assert!(matches!(
            form.into_registration(),
            Err(AuthFormError::PasswordMismatch)
        ));
    }

    #[test]
    fn register_form_rejects_short_passwords() {
        let form = RegisterForm {
            name: "Ama".to_string(),
            email: "ama@example.com".to_string(),
            phone: None,
            password: "short".to_string(),
            password_confirmation: "short".to_string(),
        };

        assert!(matches!(
            form.into_registration(),
            Err(AuthFormError::Validation(_))
        ));
    }
}
