//! Form validation for the user and role editors

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CreateUserRequest, Role, RoleRequest, UpdateUserRequest, User};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Field name to error message
pub type FieldErrors = BTreeMap<&'static str, String>;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Editable fields of a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    pub password_confirm: String,
    pub active: bool,
    pub role_ids: Vec<i64>,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            password: String::new(),
            password_confirm: String::new(),
            active: user.active,
            role_ids: user.role_ids.clone(),
        }
    }

    /// Passwords are only checked when creating a user
    pub fn validate(&self, is_new: bool) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.username.trim().is_empty() {
            errors.insert("username", "Username is required".into());
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required".into());
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Email is invalid".into());
        }
        if self.first_name.trim().is_empty() {
            errors.insert("firstName", "First name is required".into());
        }
        if self.last_name.trim().is_empty() {
            errors.insert("lastName", "Last name is required".into());
        }
        if self.role_ids.is_empty() {
            errors.insert("roleIds", "At least one role must be selected".into());
        }

        if is_new {
            if self.password.trim().is_empty() {
                errors.insert("password", "Password is required".into());
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.insert(
                    "password",
                    format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
                );
            }
            if self.password != self.password_confirm {
                errors.insert("passwordConfirm", "Passwords do not match".into());
            }
        }
        errors
    }

    pub fn to_create(&self, company_id: Option<i64>) -> CreateUserRequest {
        CreateUserRequest {
            company_id,
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            password: self.password.clone(),
            active: self.active,
            role_ids: self.role_ids.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            email: Some(self.email.trim().to_string()),
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            phone_number: Some(self.phone_number.trim().to_string()),
            active: Some(self.active),
            role_ids: Some(self.role_ids.clone()),
        }
    }
}

/// Editable fields of a role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
    pub permission_ids: Vec<i64>,
}

impl RoleForm {
    /// Roles list permission codes; the form works with ids, resolved via `lookup`
    pub fn from_role(role: &Role, lookup: impl Fn(&str) -> Option<i64>) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            permission_ids: role.permissions.iter().filter_map(|code| lookup(code)).collect(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name", "Role name is required".into());
        }
        errors
    }

    pub fn to_request(&self, company_id: Option<i64>) -> RoleRequest {
        RoleRequest {
            company_id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            permission_ids: self.permission_ids.clone(),
        }
    }
}
