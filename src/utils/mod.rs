pub mod format;
pub mod validation;

pub use format::{format_datetime, truncate};
pub use validation::{FieldErrors, RoleForm, UserForm};
