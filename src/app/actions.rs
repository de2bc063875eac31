//! Backend requests issued by the UI

use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::app::state::{AppMessage, Notice, Resource};
use crate::models::{CreateUserRequest, RoleRequest, UpdateUserRequest};
use crate::session::SessionError;

/// User-initiated work that needs the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Login { username: String, password: String },
    Load(Resource),
    LoadCatalog(String),
    LoadLanguages,
    CreateUser(CreateUserRequest),
    UpdateUser { id: i64, request: UpdateUserRequest },
    DeleteUser(i64),
    SetUserActive { id: i64, active: bool },
    CreateRole(RoleRequest),
    UpdateRole { id: i64, request: RoleRequest },
    DeleteRole(i64),
}

impl Request {
    /// Shown in front of the error when the request fails
    fn failure_context(&self) -> &'static str {
        match self {
            Self::Login { .. } => "Login failed",
            Self::Load(Resource::Users) => "Failed to load users",
            Self::Load(Resource::Roles) => "Failed to load roles",
            Self::Load(Resource::Permissions) => "Failed to load permissions",
            Self::LoadCatalog(_) => "Failed to load translations",
            Self::LoadLanguages => "Failed to load languages",
            Self::CreateUser(_) | Self::UpdateUser { .. } => "Failed to save user",
            Self::DeleteUser(_) => "Failed to delete user",
            Self::SetUserActive { .. } => "Failed to update user status",
            Self::CreateRole(_) | Self::UpdateRole { .. } => "Failed to save role",
            Self::DeleteRole(_) => "Failed to delete role",
        }
    }
}

#[derive(Debug, Error)]
enum RequestError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("no company selected")]
    NoCompany,
}

/// Run a backend request and describe its outcome as a message
pub async fn perform(api: &ApiClient, company_id: Option<i64>, request: Request) -> AppMessage {
    let context = request.failure_context();
    // A missing catalog only leaves labels untranslated
    let optional = matches!(request, Request::LoadCatalog(_) | Request::LoadLanguages);
    match run(api, company_id, request).await {
        Ok(msg) => msg,
        Err(RequestError::Api(ApiError::Unauthorized)) if !optional => AppMessage::SessionExpired,
        Err(e) if optional => {
            tracing::warn!("{}: {}", context, e);
            AppMessage::Notice(Notice::info(&format!("{}: {}", context, e)))
        }
        Err(e) => {
            tracing::error!("{}: {}", context, e);
            AppMessage::Notice(Notice::error(&format!("{}: {}", context, e)))
        }
    }
}

async fn run(api: &ApiClient, company_id: Option<i64>, request: Request) -> Result<AppMessage, RequestError> {
    let company = || company_id.ok_or(RequestError::NoCompany);

    let msg = match request {
        Request::Login { username, password } => {
            let auth = api.login(&username, &password).await?;
            api.session().create(auth)?;
            AppMessage::LoggedIn
        }
        Request::Load(Resource::Users) => AppMessage::UsersLoaded(api.users_by_company(company()?).await?),
        Request::Load(Resource::Roles) => AppMessage::RolesLoaded(api.roles_by_company(company()?).await?),
        Request::Load(Resource::Permissions) => AppMessage::PermissionsLoaded(api.all_permissions().await?),
        Request::LoadCatalog(language) => {
            let catalog = api.translations(&language).await?;
            AppMessage::CatalogLoaded { language, catalog }
        }
        Request::LoadLanguages => AppMessage::LanguagesLoaded(api.languages().await?),
        Request::CreateUser(mut body) => {
            body.company_id = body.company_id.or(company_id);
            api.create_user(&body).await?;
            AppMessage::Saved {
                resource: Resource::Users,
                message: "User created successfully".into(),
            }
        }
        Request::UpdateUser { id, request } => {
            api.update_user(id, &request).await?;
            AppMessage::Saved {
                resource: Resource::Users,
                message: "User updated successfully".into(),
            }
        }
        Request::DeleteUser(id) => {
            api.delete_user(id).await?;
            AppMessage::Saved {
                resource: Resource::Users,
                message: "User deleted successfully".into(),
            }
        }
        Request::SetUserActive { id, active } => {
            if active {
                api.activate_user(id).await?;
            } else {
                api.deactivate_user(id).await?;
            }
            let verb = if active { "activated" } else { "deactivated" };
            AppMessage::Saved {
                resource: Resource::Users,
                message: format!("User {} successfully", verb),
            }
        }
        Request::CreateRole(mut body) => {
            body.company_id = body.company_id.or(company_id);
            api.create_role(&body).await?;
            AppMessage::Saved {
                resource: Resource::Roles,
                message: "Role created successfully".into(),
            }
        }
        Request::UpdateRole { id, mut request } => {
            request.company_id = request.company_id.or(company_id);
            api.update_role(id, &request).await?;
            AppMessage::Saved {
                resource: Resource::Roles,
                message: "Role updated successfully".into(),
            }
        }
        Request::DeleteRole(id) => {
            api.delete_role(id).await?;
            AppMessage::Saved {
                resource: Resource::Roles,
                message: "Role deleted successfully".into(),
            }
        }
    };
    Ok(msg)
}
