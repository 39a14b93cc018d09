//! Form schemas checked before any state change or network call

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::a002_uploaded_file::aggregate::ALLOWED_MIME_TYPES;

pub const SIGN_IN_PASSWORD_MIN: usize = 6;
pub const SIGN_UP_PASSWORD_MIN: usize = 8;
pub const FULL_NAME_MIN: usize = 2;
pub const MESSAGE_MAX_LEN: usize = 1000;
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Form field keys, as used by the API validation list
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const AGREE_TO_TERMS: &str = "agreeToTerms";
    pub const CONTENT: &str = "content";
    pub const CODE: &str = "code";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Full name must be at least 2 characters")]
    FullNameTooShort,
    #[error("Passwords don't match")]
    PasswordMismatch,
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message is too long")]
    MessageTooLong,
    #[error("Enter the 6-digit code sent to your email")]
    InvalidCode,
    #[error("File type not supported")]
    FileTypeNotSupported,
}

/// Field name -> first error message for that field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message reported for a field
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn add(&mut self, field: &str, error: ValidationError) {
        self.insert(field, error.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Drop the error of one field (called when that field is edited)
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from `(path head, message)` pairs of an API validation list
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut errors = Self::new();
        for (field, message) in pairs {
            errors.insert(field, message);
        }
        errors
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Lenient address check: one '@', non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels
        .last()
        .map(|tld| tld.chars().count() >= 2)
        .unwrap_or(false)
}

/// Schema check for an uploaded file's MIME type
pub fn validate_mime_type(mime_type: &str) -> Result<(), ValidationError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(ValidationError::FileTypeNotSupported)
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email) {
        errors.add(fields::EMAIL, ValidationError::InvalidEmail);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        if self.password.chars().count() < SIGN_IN_PASSWORD_MIN {
            errors.add(
                fields::PASSWORD,
                ValidationError::PasswordTooShort {
                    min: SIGN_IN_PASSWORD_MIN,
                },
            );
        }
        errors.into_result(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl SignUpForm {
    /// Reports every failing field, not just the first one
    pub fn validate(self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.full_name.chars().count() < FULL_NAME_MIN {
            errors.add(fields::FULL_NAME, ValidationError::FullNameTooShort);
        }
        check_email(&mut errors, &self.email);
        if self.password.chars().count() < SIGN_UP_PASSWORD_MIN {
            errors.add(
                fields::PASSWORD,
                ValidationError::PasswordTooShort {
                    min: SIGN_UP_PASSWORD_MIN,
                },
            );
        }
        if self.password != self.confirm_password {
            errors.add(fields::CONFIRM_PASSWORD, ValidationError::PasswordMismatch);
        }
        if !self.agree_to_terms {
            errors.add(fields::AGREE_TO_TERMS, ValidationError::TermsNotAccepted);
        }
        errors.into_result(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageForm {
    pub content: String,
}

impl MessageForm {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        let len = self.content.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyMessage);
        }
        if len > MESSAGE_MAX_LEN {
            return Err(ValidationError::MessageTooLong);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyEmailForm {
    pub email: String,
    pub code: String,
}

impl VerifyEmailForm {
    pub fn is_complete(&self) -> bool {
        self.code.chars().count() == VERIFICATION_CODE_LEN
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        let code = self.code.trim();
        if code.len() != VERIFICATION_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCode);
        }
        Ok(Self {
            email: self.email,
            code: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_schema() {
        assert!(validate_mime_type("application/pdf").is_ok());
        assert!(validate_mime_type("image/jpg").is_ok());
        let err = validate_mime_type("application/x-msdownload").unwrap_err();
        assert_eq!(err, ValidationError::FileTypeNotSupported);
        assert_eq!(err.to_string(), "File type not supported");
    }

    fn sign_up() -> SignUpForm {
        SignUpForm {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "engines42".into(),
            confirm_password: "engines42".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_email_check() {
        for ok in ["a@b.co", "first.last@uni.edu.au", "x+tag@mail.example.org"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "@b.co", "a@", "a@b", "a@b.c", "a b@c.io", "a@@b.io", "a@.b.io"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn test_sign_in_valid_is_unchanged() {
        let form = SignInForm {
            email: "ada@example.com".into(),
            password: "secret".into(),
        };
        assert_eq!(form.clone().validate(), Ok(form));
    }

    #[test]
    fn test_sign_in_errors() {
        let errors = SignInForm {
            email: "nope".into(),
            password: "12345".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_sign_up_mismatch_goes_to_confirm_password() {
        let mut form = sign_up();
        form.confirm_password = "engines43".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirmPassword"), Some("Passwords don't match"));
    }

    #[test]
    fn test_sign_up_reports_all_fields() {
        let errors = SignUpForm {
            full_name: "A".into(),
            email: "bad".into(),
            password: "short".into(),
            confirm_password: "short".into(),
            agree_to_terms: false,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.get("fullName"),
            Some("Full name must be at least 2 characters")
        );
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            errors.get("agreeToTerms"),
            Some("You must agree to the terms and conditions")
        );
        assert!(errors.get("confirmPassword").is_none());
        assert!(sign_up().validate().is_ok());
    }

    #[test]
    fn test_message_length_bounds() {
        assert_eq!(
            MessageForm::new("").validate(),
            Err(ValidationError::EmptyMessage)
        );
        assert!(MessageForm::new("a").validate().is_ok());
        assert!(MessageForm::new("é".repeat(MESSAGE_MAX_LEN)).validate().is_ok());
        let err = MessageForm::new("a".repeat(MESSAGE_MAX_LEN + 1))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Message is too long");
    }

    #[test]
    fn test_verification_code() {
        let form = |code: &str| VerifyEmailForm {
            email: "ada@example.com".into(),
            code: code.into(),
        };
        assert_eq!(form(" 123456 ").validate().unwrap().code, "123456");
        assert!(form("12345").validate().is_err());
        assert!(form("12a456").validate().is_err());
        assert!(form("123456").is_complete());
    }

    #[test]
    fn test_field_errors_clear_individually() {
        let mut errors = FieldErrors::from_pairs([("email", "taken"), ("password", "weak")]);
        errors.insert("email", "ignored");
        assert_eq!(errors.get("email"), Some("taken"));
        errors.clear("email");
        assert!(errors.get("email").is_none());
        assert_eq!(errors.get("password"), Some("weak"));
    }
}
