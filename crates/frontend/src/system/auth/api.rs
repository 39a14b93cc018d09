use contracts::system::auth::{
    LoginRequest, LoginResponse, MessageResponse, RequestVerificationRequest, UserProfile,
    VerifyEmailRequest,
};

use crate::shared::api_utils::{get_with_bearer, post_json, ApiError};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        email,
        password,
        remember: true,
    };
    post_json("/auth/login", &request, "Login failed").await
}

/// Register and send a verification code to the email
pub async fn request_verification(
    request: &RequestVerificationRequest,
) -> Result<MessageResponse, ApiError> {
    post_json("/auth/request-verification", request, "Registration failed").await
}

/// Confirm the email with the received code
pub async fn verify_email(email: String, code: String) -> Result<MessageResponse, ApiError> {
    let request = VerifyEmailRequest { email, code };
    post_json("/auth/verify-email", &request, "Verification failed").await
}

/// Get the profile of the token owner
pub async fn fetch_profile(access_token: &str) -> Result<UserProfile, ApiError> {
    get_with_bearer("/user/profile", access_token, "Failed to load profile").await
}
