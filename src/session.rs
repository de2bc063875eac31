//! Signed-in session shared between the UI and the API client

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use thiserror::Error;

use crate::models::{Application, AuthResponse, Company, MenuItem, ThemeSpec, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("login response did not include a token")]
    MissingToken,
    #[error("login rejected: {0}")]
    Rejected(String),
}

/// Everything the backend handed out at login
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
    pub company: Option<Company>,
    pub applications: Vec<Application>,
    pub menus: Vec<MenuItem>,
    pub theme: Option<ThemeSpec>,
}

impl Session {
    pub fn from_auth(auth: AuthResponse) -> Result<Self, SessionError> {
        if !auth.success && auth.token.is_none() {
            let message = auth.message.unwrap_or_else(|| "Login failed".to_string());
            return Err(SessionError::Rejected(message));
        }
        let token = auth
            .token
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)?;

        Ok(Self {
            token,
            user: auth.user,
            company: auth.company,
            applications: auth.applications,
            menus: auth.menus,
            theme: auth.theme,
        })
    }

    pub fn permissions(&self) -> &[String] {
        self.user.as_ref().map(|u| u.permissions.as_slice()).unwrap_or(&[])
    }

    pub fn roles(&self) -> &[String] {
        self.user.as_ref().map(|u| u.roles.as_slice()).unwrap_or(&[])
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company
            .as_ref()
            .and_then(|c| c.id)
            .or_else(|| self.user.as_ref().and_then(|u| u.company_id))
    }
}

/// Cloneable handle to the current session, if any
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the session; `None` when signed out
    pub fn with<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.read().as_ref().map(f)
    }

    /// Start a session from a login response
    pub fn create(&self, auth: AuthResponse) -> Result<(), SessionError> {
        let session = Session::from_auth(auth)?;
        tracing::info!(
            user = session.user.as_ref().map(|u| u.username.as_str()).unwrap_or(""),
            "session created"
        );
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            tracing::info!("session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.with(|s| s.user.clone()).flatten()
    }

    pub fn company(&self) -> Option<Company> {
        self.with(|s| s.company.clone()).flatten()
    }

    pub fn company_id(&self) -> Option<i64> {
        self.with(Session::company_id).flatten()
    }

    pub fn applications(&self) -> Vec<Application> {
        self.with(|s| s.applications.clone()).unwrap_or_default()
    }

    pub fn menus(&self) -> Vec<MenuItem> {
        self.with(|s| s.menus.clone()).unwrap_or_default()
    }

    /// Menus belonging to one application
    pub fn menus_for_app(&self, code: &str) -> Vec<MenuItem> {
        self.with(|s| {
            s.menus
                .iter()
                .filter(|m| m.application_code.as_deref() == Some(code))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn theme(&self) -> Option<ThemeSpec> {
        self.with(|s| s.theme.clone()).flatten()
    }

    pub fn permissions(&self) -> Vec<String> {
        self.with(|s| s.permissions().to_vec()).unwrap_or_default()
    }

    pub fn roles(&self) -> Vec<String> {
        self.with(|s| s.roles().to_vec()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn auth(value: serde_json::Value) -> AuthResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_and_clear() {
        let ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());

        ctx.create(auth(json!({
            "success": true,
            "token": "t0k",
            "user": {"id": 1, "username": "admin", "companyId": 7, "roles": ["ADMIN"], "permissions": ["USER_VIEW"]},
        })))
        .unwrap();

        let other = ctx.clone();
        assert!(other.is_authenticated());
        assert_eq!(other.token().as_deref(), Some("t0k"));
        assert_eq!(other.company_id(), Some(7));
        assert_eq!(other.roles(), ["ADMIN"]);

        ctx.clear();
        assert!(!other.is_authenticated());
        assert!(other.permissions().is_empty());
    }

    #[test]
    fn missing_token_is_an_error() {
        let ctx = SessionContext::new();
        let err = ctx.create(auth(json!({"success": true}))).unwrap_err();
        assert_eq!(err, SessionError::MissingToken);
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn unsuccessful_login_carries_message() {
        let err = Session::from_auth(auth(json!({"success": false, "message": "Bad credentials"})))
            .unwrap_err();
        assert_eq!(err, SessionError::Rejected("Bad credentials".into()));
    }

    #[test]
    fn menus_filtered_by_application() {
        let ctx = SessionContext::new();
        ctx.create(auth(json!({
            "success": true,
            "token": "x",
            "menus": [
                {"code": "users", "title": "Users", "applicationCode": "ADMIN"},
                {"code": "stock", "title": "Stock", "applicationCode": "WMS"}
            ]
        })))
        .unwrap();
        let admin = ctx.menus_for_app("ADMIN");
        assert_eq!(admin.len(), 1);
        assert_eq!(admin[0].code, "users");
        assert_eq!(ctx.menus().len(), 2);
    }
}
