pub mod auth;
pub mod company;
pub mod menu;
pub mod permission;
pub mod role;
pub mod theme;
pub mod user;

pub use auth::{AuthResponse, LoginRequest};
pub use company::{Application, Company};
pub use menu::MenuItem;
pub use permission::Permission;
pub use role::{Role, RoleRequest};
pub use theme::ThemeSpec;
pub use user::{CreateUserRequest, UpdateUserRequest, User};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
