use serde::{Deserialize, Serialize};

use super::null_default;

/// Tenant company of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub active: bool,
    pub subscription_plan: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub user_count: i64,
}

/// An application the user may switch to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub base_url: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub active: bool,
    pub display_order: Option<i32>,
}
