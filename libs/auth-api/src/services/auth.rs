use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use shared_http::ApiClient;
use shared_models::auth::{DetailResponse, User};
use shared_models::error::ApiError;

use crate::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, ResendVerifyRequest, SignupRequest, SignupResponse,
};

/// Session lifecycle operations. Login and logout are the only places besides
/// the refresh path that touch the credential store.
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Authenticate and persist the issued credential pair.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        debug!("Logging in {}", request.email);
        let response: LoginResponse = self
            .api
            .post("/auth/login/", serde_json::to_value(request)?)
            .await?;
        self.api.store_session(&response.access, &response.refresh);
        Ok(response)
    }

    /// Register a new account; it stays inactive until e-mail verification.
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        debug!("Signing up {}", request.email);
        self.api
            .post("/auth/signup/", serde_json::to_value(request)?)
            .await
    }

    pub async fn verify_email(&self, uid: &str, token: &str) -> Result<DetailResponse, ApiError> {
        self.api
            .get(&format!("/auth/verify/{}/{}/", uid, token))
            .await
    }

    pub async fn resend_verify(&self, request: &ResendVerifyRequest) -> Result<(), ApiError> {
        self.api
            .post_unit("/auth/resend-verify/", serde_json::to_value(request)?)
            .await
    }

    pub async fn password_reset(&self, request: &PasswordResetRequest) -> Result<(), ApiError> {
        self.api
            .post_unit("/auth/password-reset/", serde_json::to_value(request)?)
            .await
    }

    pub async fn password_reset_confirm(
        &self,
        request: &PasswordResetConfirmRequest,
    ) -> Result<(), ApiError> {
        self.api
            .post_unit("/auth/password-reset/confirm/", serde_json::to_value(request)?)
            .await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.api
            .post_unit("/auth/change-password/", serde_json::to_value(request)?)
            .await
    }

    /// Profile of the authenticated account.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.api.get("/auth/me/").await
    }

    /// Revoke the refresh credential server-side, then drop the local pair.
    /// Local credentials are cleared even when the revoke call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = match self.api.credentials().refresh_token() {
            Some(refresh) => {
                debug!("Logging out");
                self.api
                    .post_unit("/auth/logout/", json!({ "refresh": refresh }))
                    .await
            }
            None => Ok(()),
        };
        self.api.clear_session();
        result
    }
}
