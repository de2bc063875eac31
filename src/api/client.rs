//! Typed client for the backend endpoints the console uses

use std::time::Duration;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, ErrorBody, Listing};
use crate::i18n::Catalog;
use crate::models::{
    AuthResponse, CreateUserRequest, LoginRequest, Permission, Role, RoleRequest,
    UpdateUserRequest, User,
};
use crate::session::SessionContext;

/// JSON client sharing the console's session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api request");

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "backend returned 401, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(bytes.to_vec()))
    }

    async fn json<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match self.send(method, path, body).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Err(ApiError::EmptyBody),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.json::<T, ()>(Method::GET, path, None).await
    }

    /// Request whose response body, if any, is ignored
    async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await.map(|_| ())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.json(Method::POST, "/auth/login", Some(&body)).await
    }

    /// Sessions are stateless tokens; signing out only forgets ours
    pub fn logout(&self) {
        self.session.clear();
    }

    pub async fn users_by_company(&self, company_id: i64) -> Result<Vec<User>, ApiError> {
        let listing: Listing<User> = self.get(&format!("/users/company/{}", company_id)).await?;
        Ok(listing.into_vec())
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.json(Method::POST, "/users", Some(request)).await
    }

    pub async fn update_user(&self, id: i64, request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.json(Method::PUT, &format!("/users/{}", id), Some(request)).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.call::<()>(Method::DELETE, &format!("/users/{}", id), None).await
    }

    pub async fn activate_user(&self, id: i64) -> Result<(), ApiError> {
        let empty = serde_json::json!({});
        self.call(Method::PUT, &format!("/users/{}/activate", id), Some(&empty)).await
    }

    pub async fn deactivate_user(&self, id: i64) -> Result<(), ApiError> {
        let empty = serde_json::json!({});
        self.call(Method::PUT, &format!("/users/{}/deactivate", id), Some(&empty)).await
    }

    pub async fn roles_by_company(&self, company_id: i64) -> Result<Vec<Role>, ApiError> {
        let listing: Listing<Role> = self.get(&format!("/roles/company/{}", company_id)).await?;
        Ok(listing.into_vec())
    }

    pub async fn create_role(&self, request: &RoleRequest) -> Result<Role, ApiError> {
        self.json(Method::POST, "/roles", Some(request)).await
    }

    pub async fn update_role(&self, id: i64, request: &RoleRequest) -> Result<Role, ApiError> {
        self.json(Method::PUT, &format!("/roles/{}", id), Some(request)).await
    }

    pub async fn delete_role(&self, id: i64) -> Result<(), ApiError> {
        self.call::<()>(Method::DELETE, &format!("/roles/{}", id), None).await
    }

    pub async fn all_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        let listing: Listing<Permission> = self.get("/permissions/all").await?;
        Ok(listing.into_vec())
    }

    pub async fn translations(&self, language: &str) -> Result<Catalog, ApiError> {
        self.get(&format!("/translations/{}", language)).await
    }

    pub async fn languages(&self) -> Result<Vec<String>, ApiError> {
        self.get("/translations/languages").await
    }
}
