pub mod dashboard;
pub mod permissions;
pub mod roles;
pub mod users;

use tokio::sync::mpsc;

use crate::app::actions::Request;
use crate::app::state::AppMessage;
use crate::menu::flatten_visible;
use crate::models::MenuItem;
use crate::session::Session;

/// Console pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Users,
    Roles,
    Permissions,
}

impl Page {
    /// Matches the `code` of the built-in navigation entries
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "dashboard" => Some(Self::Dashboard),
            "users" => Some(Self::Users),
            "roles" => Some(Self::Roles),
            "permissions" => Some(Self::Permissions),
            _ => None,
        }
    }

    /// Pages of `nav` the session may open, in navigation order
    pub fn visible(nav: &[MenuItem], session: Option<&Session>) -> Vec<Self> {
        flatten_visible(nav, session)
            .into_iter()
            .filter_map(|(_, m)| Self::from_code(&m.code))
            .collect()
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
        }
    }

    pub fn title_key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard.title",
            Self::Users => "users.title",
            Self::Roles => "roles.title",
            Self::Permissions => "permissions.title",
        }
    }
}

/// Queue a backend request on the state manager
pub(crate) async fn send_request(tx: &mpsc::Sender<AppMessage>, request: Request) {
    if tx.send(AppMessage::Request(request)).await.is_err() {
        tracing::warn!("state manager is gone, request dropped");
    }
}
