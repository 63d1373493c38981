//! Account form submissions
//!
//! Forms are validated and acknowledged; accounts are not stored.

use axum::Form;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::templates::form_errors_page;

const MIN_PASSWORD_CHARS: usize = 8;
const SUCCESS_REDIRECT: &str = "/dashboard";

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name
    pub field: &'static str,
    /// What is wrong with it
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Sign-up form fields.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password repeated
    pub confirm_password: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl SignupForm {
    /// Checks every field, collecting all problems.
    ///
    /// # Errors
    /// Returns the field errors when any field is invalid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "is required"));
        }
        if let Err(e) = validate_email(&self.email) {
            errors.push(e);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError::new(
                "password",
                "must be at least 8 characters",
            ));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new("confirm_password", "does not match password"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Log-in form fields.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// Account email
    pub email: String,
    /// Password
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    /// Checks every field, collecting all problems.
    ///
    /// # Errors
    /// Returns the field errors when any field is invalid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_email(&self.email) {
            errors.push(e);
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new("email", "is required"));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(FieldError::new("email", "is not a valid address"))
    }
}

fn rejected(title: &str, back_href: &str, errors: &[FieldError]) -> Response {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(form_errors_page(title, back_href, &messages)),
    )
        .into_response()
}

/// Handles `POST /signup`.
pub async fn signup(Form(form): Form<SignupForm>) -> Response {
    match form.validate() {
        Ok(()) => {
            tracing::info!(email = %form.email.trim(), "Sign-up accepted");
            Redirect::to(SUCCESS_REDIRECT).into_response()
        }
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "Sign-up rejected");
            rejected("Sign up failed", "/signup", &errors)
        }
    }
}

/// Handles `POST /login`.
pub async fn login(Form(form): Form<LoginForm>) -> Response {
    match form.validate() {
        Ok(()) => {
            tracing::info!(email = %form.email.trim(), "Log-in accepted");
            Redirect::to(SUCCESS_REDIRECT).into_response()
        }
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "Log-in rejected");
            rejected("Log in failed", "/login", &errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "correct horse".to_string(),
            confirm_password: "correct horse".to_string(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert_eq!(valid_signup().validate(), Ok(()));
    }

    #[test]
    fn test_signup_collects_all_errors() {
        let form = SignupForm {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "other".to_string(),
        };
        let fields: Vec<_> = form.validate().unwrap_err().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "password", "confirm_password"]);
    }

    #[test]
    fn test_empty_signup_reports_required_fields() {
        let errors = SignupForm::default().validate().unwrap_err();
        assert!(errors.contains(&FieldError::new("name", "is required")));
        assert!(errors.contains(&FieldError::new("email", "is required")));
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("  sam@example.com ").is_ok());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("sam@").is_err());
        assert!(validate_email("sam@localhost").is_err());
        assert!(validate_email("sam@@example.com").is_err());
        assert!(validate_email("sam@example.").is_err());
    }

    #[test]
    fn test_login_rules() {
        let ok = LoginForm {
            email: "sam@example.com".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(ok.validate(), Ok(()));

        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_debug_hides_passwords() {
        let debug = format!("{:?}", valid_signup());
        assert!(!debug.contains("correct horse"));
        assert!(debug.contains("sam@example.com"));
    }
}
