use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_default;
use crate::table::{FieldKind, FieldSpec, Record, Value};

/// Module label used when a permission has none
pub const DEFAULT_MODULE: &str = "Other";

/// A grantable permission code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permission {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub description: Option<String>,
    pub module_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Permission {
    pub fn module(&self) -> &str {
        self.module_name
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODULE)
    }
}

impl Record for Permission {
    fn schema() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("id", FieldKind::Integer),
            FieldSpec::new("code", FieldKind::Text),
            FieldSpec::new("name", FieldKind::Text),
            FieldSpec::new("description", FieldKind::Text),
            FieldSpec::new("moduleName", FieldKind::Text),
            FieldSpec::new("createdAt", FieldKind::DateTime),
        ];
        FIELDS
    }

    fn field(&self, accessor: &str) -> Option<Value> {
        let value: Value = match accessor {
            "id" => self.id.into(),
            "code" => self.code.clone().into(),
            "name" => self.name.clone().into(),
            "description" => self.description.clone().into(),
            "moduleName" => self.module_name.clone().into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Distinct module names in first-seen order
pub fn modules(permissions: &[Permission]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for perm in permissions {
        if !seen.iter().any(|m| m == perm.module()) {
            seen.push(perm.module().to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(code: &str, module: Option<&str>) -> Permission {
        Permission {
            code: code.into(),
            module_name: module.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn missing_module_is_other() {
        assert_eq!(perm("X", None).module(), "Other");
        assert_eq!(perm("X", Some("")).module(), "Other");
        assert_eq!(perm("X", Some("Users")).module(), "Users");
    }

    #[test]
    fn modules_are_distinct_in_order() {
        let perms = vec![
            perm("USER_VIEW", Some("Users")),
            perm("ROLE_VIEW", Some("Roles")),
            perm("USER_EDIT", Some("Users")),
            perm("MISC", None),
        ];
        assert_eq!(modules(&perms), ["Users", "Roles", "Other"]);
    }
}
