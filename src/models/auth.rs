use serde::{Deserialize, Serialize};

use super::null_default;
use super::{Application, Company, MenuItem, ThemeSpec, User};

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    #[serde(deserialize_with = "null_default")]
    pub success: bool,
    pub message: Option<String>,
    pub token: Option<String>,
    pub user: Option<User>,
    pub company: Option<Company>,
    #[serde(deserialize_with = "null_default")]
    pub applications: Vec<Application>,
    #[serde(deserialize_with = "null_default")]
    pub menus: Vec<MenuItem>,
    pub theme: Option<ThemeSpec>,
}
