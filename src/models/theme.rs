use serde::{Deserialize, Serialize};

/// Colour scheme published by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSpec {
    pub code: Option<String>,
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub error_color: Option<String>,
    pub success_color: Option<String>,
    pub warning_color: Option<String>,
    pub dark_mode: Option<bool>,
}
