use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::ApiConfig;
use shared_models::auth::RefreshResponse;
use shared_models::error::ApiError;

use crate::credentials::CredentialStore;
use crate::refresh::{RefreshGate, RefreshOutcome, RefreshTicket};

type SessionExpiredHandler = Arc<dyn Fn() + Send + Sync>;

/// Authenticated API client. Attaches the stored bearer credential to every
/// outbound request, and on a 401 coordinates one shared token refresh across
/// however many requests fail while it is in flight. Each affected request is
/// replayed at most once with the refreshed credential.
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    gate: RefreshGate,
    refresh_timeout: Duration,
    on_session_expired: Option<SessionExpiredHandler>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            gate: RefreshGate::new(),
            refresh_timeout: Duration::from_secs(config.refresh_timeout_secs),
            on_session_expired: None,
        })
    }

    /// Install the hook invoked when a refresh cycle fails terminally. The
    /// embedding application navigates to its login entry point from here.
    pub fn with_session_expired_handler(
        mut self,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_session_expired = Some(Arc::new(handler));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Persist a freshly issued credential pair (login).
    pub fn store_session(&self, access: &str, refresh: &str) {
        self.store.set_tokens(access, refresh);
    }

    /// Drop all stored credentials (logout).
    pub fn clear_session(&self) {
        self.store.clear();
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    /// POST whose response body is empty or irrelevant (204-style endpoints).
    pub async fn post_unit(&self, path: &str, body: Value) -> Result<(), ApiError> {
        self.request_unit(Method::POST, path, &[], Some(body)).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.send_with_refresh(method, path, query, body).await?;
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        let response = self.send_with_refresh(method, path, query, body).await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Dispatch with the stored access credential attached, intercepting a
    /// single 401: refresh (or join the in-flight refresh) and replay once.
    /// Every other failure status passes through to the caller untouched.
    async fn send_with_refresh(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let access = self.store.access_token();
        let response = self
            .dispatch(method.clone(), path, query, &body, access.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let status = response.status();
        let detail =
            ApiError::message_from_body(status, &response.text().await.unwrap_or_default());
        debug!("Access credential rejected on {} {}, entering refresh", method, path);

        let fresh = self.acquire_fresh_access(&detail).await?;
        // One replay with the refreshed credential; a second rejection
        // surfaces through the normal status mapping, never another refresh.
        self.dispatch(method, path, query, &body, Some(fresh.as_str())).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: &Option<Value>,
        access: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut request = self.client.request(method, &url).headers(Self::base_headers());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = access {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        Ok(request.send().await?)
    }

    fn base_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ApiError::message_from_body(status, &body);
        error!("API error ({}): {}", status, message);
        Err(ApiError::from_status(status, message))
    }

    /// Obtain a usable access credential after a 401, sharing one refresh
    /// call across every request that fails while it is in flight.
    async fn acquire_fresh_access(&self, original_detail: &str) -> Result<String, ApiError> {
        match self.gate.join() {
            RefreshTicket::Waiter(receiver) => {
                debug!("Refresh already in flight, queueing request");
                match receiver.await {
                    Ok(Ok(access)) => Ok(access),
                    Ok(Err(detail)) => Err(ApiError::SessionExpired(detail)),
                    Err(_) => Err(ApiError::SessionExpired("refresh cycle aborted".to_string())),
                }
            }
            RefreshTicket::Leader => {
                let outcome = self.run_refresh().await;
                if let Err(detail) = &outcome {
                    warn!("Token refresh failed: {}; clearing stored credentials", detail);
                    self.store.clear();
                    if let Some(handler) = &self.on_session_expired {
                        handler();
                    }
                }
                self.gate.settle(&outcome);
                match outcome {
                    Ok(access) => {
                        debug!("Access credential refreshed");
                        Ok(access)
                    }
                    // The request that opened the cycle gets its own
                    // authorization failure back, as if never intercepted.
                    Err(_) => Err(ApiError::Auth(original_detail.to_string())),
                }
            }
        }
    }

    /// One refresh call, on a path that bypasses the interception layer so it
    /// can never recurse into another refresh cycle. Bounded by the refresh
    /// timeout so parked requests cannot wait on a hung call forever.
    async fn run_refresh(&self) -> RefreshOutcome {
        let refresh = self
            .store
            .refresh_token()
            .ok_or_else(|| "no refresh credential stored".to_string())?;

        let url = format!("{}/auth/token/refresh/", self.base_url);
        let call = async {
            let response = self
                .client
                .post(&url)
                .json(&serde_json::json!({ "refresh": refresh }))
                .send()
                .await
                .map_err(|err| err.to_string())?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::message_from_body(status, &body));
            }
            response
                .json::<RefreshResponse>()
                .await
                .map_err(|err| err.to_string())
        };

        let refreshed = tokio::time::timeout(self.refresh_timeout, call)
            .await
            .map_err(|_| "timed out waiting for token refresh".to_string())??;

        match refreshed.refresh.as_deref() {
            Some(rotated) => self.store.set_tokens(&refreshed.access, rotated),
            None => self.store.set_access_token(&refreshed.access),
        }
        Ok(refreshed.access)
    }
}
