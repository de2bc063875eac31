use serde::{Deserialize, Serialize};

use super::null_default;

/// A navigation entry; entries nest through `children`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub id: Option<i64>,
    pub application_id: Option<i64>,
    pub application_code: Option<String>,
    pub parent_id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    pub icon: Option<String>,
    pub path: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default = "default_true", deserialize_with = "null_true")]
    pub active: bool,
    #[serde(default = "default_true", deserialize_with = "null_true")]
    pub visible: bool,
    pub required_permission: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub allowed_roles: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub children: Vec<MenuItem>,
}

fn default_true() -> bool {
    true
}

fn null_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|b| b.unwrap_or(true))
}

impl MenuItem {
    pub fn new(code: &str, title: &str) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            active: true,
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.required_permission = Some(permission.to_string());
        self
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.allowed_roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.display_order = Some(order);
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
