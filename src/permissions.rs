//! Permission and role checks against the current session

use crate::session::{Session, SessionContext};

pub const USER_VIEW: &str = "USER_VIEW";
pub const USER_CREATE: &str = "USER_CREATE";
pub const USER_EDIT: &str = "USER_EDIT";
pub const USER_DELETE: &str = "USER_DELETE";
pub const ROLE_VIEW: &str = "ROLE_VIEW";
pub const ROLE_MANAGE: &str = "ROLE_MANAGE";
pub const COMPANY_VIEW: &str = "COMPANY_VIEW";
pub const COMPANY_EDIT: &str = "COMPANY_EDIT";
pub const APP_MANAGE: &str = "APP_MANAGE";
pub const AUDIT_VIEW: &str = "AUDIT_VIEW";

fn contains(held: &[String], code: &str) -> bool {
    held.iter().any(|h| h == code)
}

impl Session {
    pub fn has_permission(&self, code: &str) -> bool {
        contains(self.permissions(), code)
    }

    pub fn has_any_permission(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.has_permission(c))
    }

    pub fn has_all_permissions(&self, codes: &[&str]) -> bool {
        codes.iter().all(|c| self.has_permission(c))
    }

    pub fn has_role(&self, role: &str) -> bool {
        contains(self.roles(), role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }

    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|r| self.has_role(r))
    }
}

// Signed out means nothing is granted, but an empty "all" list still holds.
impl SessionContext {
    pub fn has_permission(&self, code: &str) -> bool {
        self.with(|s| s.has_permission(code)).unwrap_or(false)
    }

    pub fn has_any_permission(&self, codes: &[&str]) -> bool {
        self.with(|s| s.has_any_permission(codes)).unwrap_or(false)
    }

    pub fn has_all_permissions(&self, codes: &[&str]) -> bool {
        self.with(|s| s.has_all_permissions(codes))
            .unwrap_or(codes.is_empty())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.with(|s| s.has_role(role)).unwrap_or(false)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.with(|s| s.has_any_role(roles)).unwrap_or(false)
    }

    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        self.with(|s| s.has_all_roles(roles)).unwrap_or(roles.is_empty())
    }
}

/// Precomputed checks the pages gate their actions on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_view_users: bool,
    pub can_create_user: bool,
    pub can_edit_user: bool,
    pub can_delete_user: bool,
    pub can_manage_users: bool,
    pub can_view_roles: bool,
    pub can_manage_roles: bool,
    pub can_view_company: bool,
    pub can_edit_company: bool,
    pub can_manage_apps: bool,
    pub can_view_audit: bool,
    pub is_admin: bool,
    pub is_manager: bool,
    pub is_employee: bool,
}

impl Capabilities {
    pub fn of(session: &SessionContext) -> Self {
        session.with(Self::for_session).unwrap_or_default()
    }

    pub fn for_session(s: &Session) -> Self {
        Self {
            can_view_users: s.has_permission(USER_VIEW),
            can_create_user: s.has_permission(USER_CREATE),
            can_edit_user: s.has_permission(USER_EDIT),
            can_delete_user: s.has_permission(USER_DELETE),
            can_manage_users: s.has_any_permission(&[USER_CREATE, USER_EDIT, USER_DELETE]),
            can_view_roles: s.has_permission(ROLE_VIEW),
            can_manage_roles: s.has_permission(ROLE_MANAGE),
            can_view_company: s.has_permission(COMPANY_VIEW),
            can_edit_company: s.has_permission(COMPANY_EDIT),
            can_manage_apps: s.has_permission(APP_MANAGE),
            can_view_audit: s.has_permission(AUDIT_VIEW),
            is_admin: s.has_role("ADMIN"),
            is_manager: s.has_role("MANAGER"),
            is_employee: s.has_role("EMPLOYEE"),
        }
    }
}
