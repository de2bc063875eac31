use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_default;
use crate::table::{FieldKind, FieldSpec, Record, Value};

/// A user account as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<i64>,
    pub company_id: Option<i64>,
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub avatar: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_default")]
    pub email_verified: bool,
    pub last_login: Option<NaiveDateTime>,
    #[serde(deserialize_with = "null_default")]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub role_ids: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    pub permissions: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub applications: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Name shown in the header; falls back to the username
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }

    /// Up to two uppercase initials, `U` when nothing is known
    pub fn initials(&self) -> String {
        let first = self.first_name.as_deref().and_then(|s| s.chars().next());
        let last = self
            .last_name
            .as_deref()
            .and_then(|s| s.chars().next())
            .or_else(|| self.username.chars().next());
        let initials: String = first.into_iter().chain(last).flat_map(char::to_uppercase).collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or("User")
    }
}

impl Record for User {
    fn schema() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("id", FieldKind::Integer),
            FieldSpec::new("username", FieldKind::Text),
            FieldSpec::new("email", FieldKind::Text),
            FieldSpec::new("firstName", FieldKind::Text),
            FieldSpec::new("lastName", FieldKind::Text),
            FieldSpec::new("phoneNumber", FieldKind::Text),
            FieldSpec::new("companyName", FieldKind::Text),
            FieldSpec::new("roles", FieldKind::List),
            FieldSpec::new("active", FieldKind::Bool),
            FieldSpec::new("lastLogin", FieldKind::DateTime),
            FieldSpec::new("createdAt", FieldKind::DateTime),
        ];
        FIELDS
    }

    fn field(&self, accessor: &str) -> Option<Value> {
        let value: Value = match accessor {
            "id" => self.id.into(),
            "username" => self.username.clone().into(),
            "email" => self.email.clone().into(),
            "firstName" => self.first_name.clone().into(),
            "lastName" => self.last_name.clone().into(),
            "phoneNumber" => self.phone_number.clone().into(),
            "companyName" => self.company_name.clone().into(),
            "roles" => self.roles.clone().into(),
            "active" => self.active.into(),
            "lastLogin" => self.last_login.into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Payload for `POST /users`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub company_id: Option<i64>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    pub active: bool,
    pub role_ids: Vec<i64>,
}

/// Payload for `PUT /users/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<i64>>,
}
