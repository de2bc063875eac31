//! Translation catalogs keyed by language

use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Used when the backend cannot list its languages
pub const FALLBACK_LANGUAGES: [&str; 3] = ["en", "uz", "ru"];

pub type Catalog = HashMap<String, String>;

/// English labels for every key the console uses
const BUILTIN_EN: &[(&str, &str)] = &[
    ("common.adminPanel", "BizCore Admin"),
    ("common.company", "Company"),
    ("common.role", "Role"),
    ("common.logout", "Logout"),
    ("common.confirmLogout", "Are you sure you want to log out?"),
    ("common.changeLanguage", "Change language"),
    ("common.language", "Language"),
    ("common.actions", "Actions"),
    ("common.save", "Save"),
    ("common.cancel", "Cancel"),
    ("common.yes", "Yes"),
    ("common.no", "No"),
    ("common.active", "Active"),
    ("common.inactive", "Inactive"),
    ("common.loading", "Loading..."),
    ("common.search", "Search..."),
    ("table.noData", "No data available"),
    ("table.showing", "Showing {start} to {end} of {total} entries"),
    ("table.page", "Page {page} of {total}"),
    ("login.title", "Sign in"),
    ("login.username", "Username"),
    ("login.password", "Password"),
    ("login.submit", "Login"),
    ("dashboard.title", "Dashboard"),
    ("dashboard.welcome", "Welcome"),
    ("dashboard.lastLogin", "Last login"),
    ("dashboard.applications", "Applications"),
    ("dashboard.recentActivity", "Recent Activity"),
    ("dashboard.noActivity", "No recent activity"),
    ("users.title", "Users"),
    ("users.addUser", "Add User"),
    ("users.editUser", "Edit User"),
    ("users.deleteConfirm", "Delete user '{name}'?"),
    ("users.search", "Search users..."),
    ("users.username", "Username"),
    ("users.email", "Email"),
    ("users.firstName", "First Name"),
    ("users.lastName", "Last Name"),
    ("users.phone", "Phone"),
    ("users.password", "Password"),
    ("users.confirmPassword", "Confirm Password"),
    ("users.roles", "Roles"),
    ("users.status", "Status"),
    ("roles.title", "Roles"),
    ("roles.addRole", "Add Role"),
    ("roles.editRole", "Edit Role"),
    ("roles.deleteConfirm", "Delete role '{name}'?"),
    ("roles.search", "Search roles..."),
    ("roles.name", "Name"),
    ("roles.description", "Description"),
    ("roles.permissions", "Permissions"),
    ("roles.systemRole", "System Role"),
    ("roles.permissionCount", "{count} permissions"),
    ("permissions.title", "Permissions"),
    ("permissions.search", "Search permissions..."),
    ("permissions.code", "Code"),
    ("permissions.name", "Name"),
    ("permissions.description", "Description"),
    ("permissions.module", "Module"),
    ("permissions.allModules", "All modules"),
];

/// Current language plus every catalog loaded so far
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    catalogs: HashMap<String, Catalog>,
    available: Vec<String>,
}

impl Translator {
    pub fn new(language: &str) -> Self {
        let builtin = BUILTIN_EN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            language: language.to_string(),
            catalogs: HashMap::from([(DEFAULT_LANGUAGE.to_string(), builtin)]),
            available: FALLBACK_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn available_languages(&self) -> &[String] {
        &self.available
    }

    pub fn set_available_languages(&mut self, languages: Vec<String>) {
        if !languages.is_empty() {
            self.available = languages;
        }
    }

    pub fn has_catalog(&self, language: &str) -> bool {
        self.catalogs.contains_key(language)
    }

    /// Merge a fetched catalog over whatever is already known for `language`
    pub fn insert_catalog(&mut self, language: &str, catalog: Catalog) {
        tracing::debug!(language, keys = catalog.len(), "translation catalog loaded");
        self.catalogs
            .entry(language.to_string())
            .or_default()
            .extend(catalog);
    }

    /// Switch language. Returns true when its catalog still has to be fetched.
    pub fn change_language(&mut self, language: &str) -> bool {
        self.language = language.to_string();
        !self.has_catalog(language)
    }

    /// Translated text, or the key itself when the current catalog lacks it
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(&self.language, key).unwrap_or(key)
    }

    /// Translate and substitute `{name}` placeholders
    pub fn t_with(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter().fold(self.t(key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(language)
            .and_then(|c| c.get(key))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}
