use crate::shared::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "access_token";
/// Storage key of the serialized `UserInfo`
pub const USER_KEY: &str = "user";

/// Delay before the verified screen moves on to the dashboard, ms
pub const VERIFY_REDIRECT_MS: u32 = 2000;
/// Seconds before a verification code can be requested again
pub const RESEND_COOLDOWN_SECS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestVerificationRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RequestVerificationRequest {
    /// Body of the "resend code" call, which only knows the email
    pub fn resend(email: impl Into<String>) -> Self {
        Self {
            full_name: "Resend Request".to_string(),
            email: email.into(),
            password: "placeholder".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Server message, or an empty string when the body had none
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// `GET /user/profile` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFieldError {
    #[serde(default)]
    pub path: Vec<String>,
    pub message: String,
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiFieldError>,
}

impl ApiErrorBody {
    pub fn summary(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Field errors keyed by the first path segment
    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::from_pairs(self.errors.iter().filter_map(|e| {
            e.path
                .first()
                .map(|field| (field.as_str(), e.message.as_str()))
        }))
    }
}

/// Query of the `/auth/verify-email` route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmailQuery {
    pub email: String,
}

/// Name parts shown in the sidebar and the greeting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileName {
    /// First word is the first name, second word the last name
    pub fn from_full_name(full_name: &str, email: &str) -> Self {
        let mut words = full_name.split(' ');
        let first = words.next().unwrap_or_default();
        let last = words.next().unwrap_or_default();
        Self {
            first_name: if first.is_empty() {
                full_name.to_string()
            } else {
                first.to_string()
            },
            last_name: last.to_string(),
            email: email.to_string(),
        }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        Self::from_full_name(&profile.full_name, &profile.email)
    }

    pub fn from_user(user: &UserInfo) -> Self {
        Self::from_full_name(&user.full_name, &user.email)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Avatar letter
    pub fn initial(&self) -> char {
        self.first_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    pub fn greeting_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            "User"
        } else {
            &self.first_name
        }
    }
}

/// Countdown gating the "resend code" action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self {
            remaining: RESEND_COOLDOWN_SECS,
        }
    }
}

impl ResendCooldown {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// One second elapsed
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.remaining = RESEND_COOLDOWN_SECS;
    }

    pub fn label(&self) -> String {
        if self.can_resend() {
            "Resend Code".to_string()
        } else {
            format!("Resend in {}s", self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shape() {
        let json = r#"{"access_token":"t0k","user":{"id":7,"email":"a@b.co","fullName":"Ada L"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "t0k");
        assert_eq!(resp.user.full_name, "Ada L");
        assert_eq!(resp.user.id, Some(7));
    }

    #[test]
    fn test_request_bodies_use_wire_names() {
        let body = serde_json::to_value(RequestVerificationRequest::resend("a@b.co")).unwrap();
        assert_eq!(body["fullName"], "Resend Request");
        assert_eq!(body["password"], "placeholder");

        let login = serde_json::to_value(LoginRequest {
            email: "a@b.co".into(),
            password: "secret".into(),
            remember: true,
        })
        .unwrap();
        assert_eq!(login["remember"], true);
    }

    #[test]
    fn test_message_response_text() {
        let sent: MessageResponse =
            serde_json::from_str(r#"{"message":"Verification code sent"}"#).unwrap();
        assert_eq!(sent.text(), "Verification code sent");

        let empty: MessageResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_profile_body() {
        let json = r#"{"id":1,"fullName":"Grace Brewster Hopper","email":"g@navy.mil","isVerified":true}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.is_verified);

        let name = ProfileName::from_profile(&profile);
        assert_eq!(name.first_name, "Grace");
        assert_eq!(name.last_name, "Brewster");
        assert_eq!(name.initial(), 'G');
        assert_eq!(name.display_name(), "Grace Brewster");
    }

    #[test]
    fn test_profile_name_fallbacks() {
        let name = ProfileName::from_full_name("", "x@y.io");
        assert_eq!(name.initial(), 'U');
        assert_eq!(name.greeting_name(), "User");

        let single = ProfileName::from_full_name("Plato", "p@academy.gr");
        assert_eq!(single.first_name, "Plato");
        assert_eq!(single.last_name, "");
        assert_eq!(single.display_name(), "Plato");
    }

    #[test]
    fn test_error_body_field_errors() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":"Validation failed","errors":[{"path":["email"],"message":"Email already registered"},{"path":[],"message":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(body.summary(), Some("Validation failed"));
        let fields = body.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("email"), Some("Email already registered"));

        let plain: ApiErrorBody = serde_json::from_str(r#"{"error":"Invalid credentials"}"#).unwrap();
        assert!(plain.field_errors().is_empty());
    }

    #[test]
    fn test_resend_cooldown() {
        let mut cooldown = ResendCooldown::default();
        assert!(!cooldown.can_resend());
        assert_eq!(cooldown.label(), "Resend in 60s");
        for _ in 0..RESEND_COOLDOWN_SECS + 5 {
            cooldown.tick();
        }
        assert!(cooldown.can_resend());
        assert_eq!(cooldown.label(), "Resend Code");
        cooldown.reset();
        assert_eq!(cooldown.remaining(), 60);
    }
}
