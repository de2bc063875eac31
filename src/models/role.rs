use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_default;
use crate::table::{FieldKind, FieldSpec, Record, Value};

/// A role grouping permission codes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub id: Option<i64>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub system_role: bool,
    #[serde(deserialize_with = "null_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_default")]
    pub permissions: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub user_count: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Role {
    /// System roles are managed by the backend and cannot be edited
    pub fn is_editable(&self) -> bool {
        !self.system_role
    }
}

impl Record for Role {
    fn schema() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("id", FieldKind::Integer),
            FieldSpec::new("name", FieldKind::Text),
            FieldSpec::new("description", FieldKind::Text),
            FieldSpec::new("permissions", FieldKind::List),
            FieldSpec::new("systemRole", FieldKind::Bool),
            FieldSpec::new("active", FieldKind::Bool),
            FieldSpec::new("userCount", FieldKind::Integer),
            FieldSpec::new("createdAt", FieldKind::DateTime),
        ];
        FIELDS
    }

    fn field(&self, accessor: &str) -> Option<Value> {
        let value: Value = match accessor {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "description" => self.description.clone().into(),
            "permissions" => self.permissions.clone().into(),
            "systemRole" => self.system_role.into(),
            "active" => self.active.into(),
            "userCount" => self.user_count.into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Payload for creating or updating a role
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub company_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub permission_ids: Vec<i64>,
}
