//! Application state management

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc, RwLock};

use crate::api::ApiClient;
use crate::app::actions::{self, Request};
use crate::config::Settings;
use crate::i18n::{Catalog, Translator};
use crate::menu;
use crate::models::{Permission, Role, User};
use crate::permissions::Capabilities;
use crate::session::SessionContext;

/// Collections the console loads from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Roles,
    Permissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: Instant,
}

impl Notice {
    pub const TTL: Duration = Duration::from_secs(5);

    fn new(level: NoticeLevel, text: &str) -> Self {
        Self {
            level,
            text: text.to_string(),
            at: Instant::now(),
        }
    }

    pub fn info(text: &str) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: &str) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn error(text: &str) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    pub fn is_expired(&self) -> bool {
        self.at.elapsed() > Self::TTL
    }
}

/// Messages for state updates
#[derive(Debug)]
pub enum AppMessage {
    // From the UI
    Request(Request),
    Logout,
    ChangeLanguage(String),

    // From request tasks
    LoggedIn,
    SessionExpired,
    UsersLoaded(Vec<User>),
    RolesLoaded(Vec<Role>),
    PermissionsLoaded(Vec<Permission>),
    CatalogLoaded { language: String, catalog: Catalog },
    LanguagesLoaded(Vec<String>),
    Saved { resource: Resource, message: String },
    Notice(Notice),
}

/// UI update signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdateSignal {
    SessionChanged,
    UsersUpdated,
    RolesUpdated,
    PermissionsUpdated,
    TranslationsUpdated,
    NoticePosted,
}

/// Central application state
pub struct AppState {
    pub session: SessionContext,
    pub api: ApiClient,
    pub users: RwLock<Vec<User>>,
    pub roles: RwLock<Vec<Role>>,
    pub permissions: RwLock<Vec<Permission>>,
    pub translator: RwLock<Translator>,
    pub notices: RwLock<VecDeque<Notice>>,
    pub settings: RwLock<Settings>,
    pub config_path: Option<String>,
    pub ui_update_tx: broadcast::Sender<UiUpdateSignal>,
    in_flight: AtomicUsize,

    pub max_notices: usize,
}

impl AppState {
    pub fn new(
        settings: Settings,
        config_path: Option<String>,
        api: ApiClient,
        ui_update_tx: broadcast::Sender<UiUpdateSignal>,
    ) -> Self {
        Self {
            session: api.session().clone(),
            api,
            users: RwLock::new(Vec::new()),
            roles: RwLock::new(Vec::new()),
            permissions: RwLock::new(Vec::new()),
            translator: RwLock::new(Translator::new(&settings.language)),
            notices: RwLock::new(VecDeque::new()),
            settings: RwLock::new(settings),
            config_path,
            ui_update_tx,
            in_flight: AtomicUsize::new(0),
            max_notices: 20,
        }
    }

    pub fn notify_ui(&self, signal: UiUpdateSignal) {
        let _ = self.ui_update_tx.send(signal);
    }

    /// Requests currently waiting on the backend
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Company whose users and roles are managed
    pub async fn company_id(&self) -> Option<i64> {
        let configured = self.settings.read().await.company_id;
        configured.or_else(|| self.session.company_id())
    }

    pub async fn post_notice(&self, notice: Notice) {
        let mut notices = self.notices.write().await;
        notices.push_front(notice);
        while notices.len() > self.max_notices {
            notices.pop_back();
        }
        drop(notices);
        self.notify_ui(UiUpdateSignal::NoticePosted);
    }

    /// Most recent notice that has not expired yet
    pub fn current_notice(&self) -> Option<Notice> {
        self.notices
            .try_read()
            .ok()
            .and_then(|n| n.front().filter(|n| !n.is_expired()).cloned())
    }

    async fn clear_data(&self) {
        self.users.write().await.clear();
        self.roles.write().await.clear();
        self.permissions.write().await.clear();
        self.notify_ui(UiUpdateSignal::UsersUpdated);
        self.notify_ui(UiUpdateSignal::RolesUpdated);
        self.notify_ui(UiUpdateSignal::PermissionsUpdated);
    }

    /// Loads the signed-in user is allowed to see
    fn initial_loads(&self) -> Vec<Resource> {
        let caps = Capabilities::of(&self.session);
        let can_see_permissions = self
            .session
            .with(|s| menu::can_open_permissions(Some(s)))
            .unwrap_or(false);

        let mut loads = Vec::new();
        if caps.can_view_users {
            loads.push(Resource::Users);
        }
        if caps.can_view_roles || caps.can_manage_users {
            loads.push(Resource::Roles);
        }
        if can_see_permissions || caps.can_manage_roles {
            loads.push(Resource::Permissions);
        }
        loads
    }

    async fn persist_language(&self, language: &str) {
        let mut settings = self.settings.write().await;
        if settings.language == language {
            return;
        }
        settings.language = language.to_string();
        if let Err(e) = settings.save(self.config_path.as_deref()) {
            tracing::warn!("Failed to save language preference: {}", e);
        }
    }
}

/// Run a backend request on its own task; the outcome comes back on `tx`
fn spawn_request(state: &Arc<AppState>, request: Request, tx: &mpsc::Sender<AppMessage>) {
    let state = state.clone();
    let tx = tx.clone();
    state.in_flight.fetch_add(1, Ordering::Relaxed);
    tokio::spawn(async move {
        let company_id = state.company_id().await;
        let msg = actions::perform(&state.api, company_id, request).await;
        state.in_flight.fetch_sub(1, Ordering::Relaxed);
        if tx.send(msg).await.is_err() {
            tracing::debug!("state manager gone, dropping request result");
        }
    });
}

/// Apply one message to the shared state
pub async fn handle_message(state: &Arc<AppState>, msg: AppMessage, tx: &mpsc::Sender<AppMessage>) {
    match msg {
        AppMessage::Request(request) => {
            tracing::debug!(?request, "dispatching request");
            spawn_request(state, request, tx);
        }

        AppMessage::Logout => {
            state.api.logout();
            state.clear_data().await;
            state.notify_ui(UiUpdateSignal::SessionChanged);
        }

        AppMessage::ChangeLanguage(language) => {
            let needs_fetch = state.translator.write().await.change_language(&language);
            state.persist_language(&language).await;
            if needs_fetch {
                spawn_request(state, Request::LoadCatalog(language), tx);
            }
            state.notify_ui(UiUpdateSignal::TranslationsUpdated);
        }

        AppMessage::LoggedIn => {
            tracing::info!("Logged in");
            state.notify_ui(UiUpdateSignal::SessionChanged);

            let language = state.translator.read().await.language().to_string();
            spawn_request(state, Request::LoadCatalog(language), tx);
            spawn_request(state, Request::LoadLanguages, tx);
            for resource in state.initial_loads() {
                spawn_request(state, Request::Load(resource), tx);
            }
        }

        AppMessage::SessionExpired => {
            tracing::warn!("Session expired");
            state.clear_data().await;
            state.notify_ui(UiUpdateSignal::SessionChanged);
            state.post_notice(Notice::error("Session expired, please log in again")).await;
        }

        AppMessage::UsersLoaded(users) => {
            tracing::debug!("Loaded {} users", users.len());
            *state.users.write().await = users;
            state.notify_ui(UiUpdateSignal::UsersUpdated);
        }

        AppMessage::RolesLoaded(roles) => {
            tracing::debug!("Loaded {} roles", roles.len());
            *state.roles.write().await = roles;
            state.notify_ui(UiUpdateSignal::RolesUpdated);
        }

        AppMessage::PermissionsLoaded(permissions) => {
            tracing::debug!("Loaded {} permissions", permissions.len());
            *state.permissions.write().await = permissions;
            state.notify_ui(UiUpdateSignal::PermissionsUpdated);
        }

        AppMessage::CatalogLoaded { language, catalog } => {
            state.translator.write().await.insert_catalog(&language, catalog);
            state.notify_ui(UiUpdateSignal::TranslationsUpdated);
        }

        AppMessage::LanguagesLoaded(languages) => {
            state.translator.write().await.set_available_languages(languages);
            state.notify_ui(UiUpdateSignal::TranslationsUpdated);
        }

        AppMessage::Saved { resource, message } => {
            state.post_notice(Notice::success(&message)).await;
            spawn_request(state, Request::Load(resource), tx);
        }

        AppMessage::Notice(notice) => {
            state.post_notice(notice).await;
        }
    }
}

/// Run the state manager task
pub async fn run_state_manager(
    state: Arc<AppState>,
    mut rx: mpsc::Receiver<AppMessage>,
    tx: mpsc::Sender<AppMessage>,
) {
    tracing::info!("State manager started");

    while let Some(msg) = rx.recv().await {
        handle_message(&state, msg, &tx).await;
    }

    tracing::info!("State manager stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthResponse;
    use serde_json::json;

    fn test_state() -> (Arc<AppState>, broadcast::Receiver<UiUpdateSignal>) {
        let (ui_tx, ui_rx) = broadcast::channel(32);
        let api = ApiClient::new(
            "http://127.0.0.1:9/api",
            Duration::from_secs(1),
            SessionContext::new(),
        )
        .unwrap();
        let state = AppState::new(Settings::default(), None, api, ui_tx);
        (Arc::new(state), ui_rx)
    }

    fn sign_in(state: &AppState, perms: &[&str]) {
        let auth: AuthResponse = serde_json::from_value(json!({
            "success": true,
            "token": "t",
            "company": {"id": 3, "code": "ACME", "name": "Acme"},
            "user": {"username": "admin", "permissions": perms, "roles": ["ADMIN"]}
        }))
        .unwrap();
        state.session.create(auth).unwrap();
    }

    #[tokio::test]
    async fn loaded_rows_replace_state_and_signal() {
        let (state, mut ui_rx) = test_state();
        let (tx, _rx) = mpsc::channel(8);

        let users = vec![User {
            username: "ann".into(),
            ..Default::default()
        }];
        handle_message(&state, AppMessage::UsersLoaded(users), &tx).await;

        assert_eq!(state.users.read().await.len(), 1);
        assert_eq!(ui_rx.recv().await.unwrap(), UiUpdateSignal::UsersUpdated);
    }

    #[tokio::test]
    async fn logout_clears_session_and_data() {
        let (state, _ui_rx) = test_state();
        let (tx, _rx) = mpsc::channel(8);
        sign_in(&state, &["USER_VIEW"]);
        *state.roles.write().await = vec![Role::default()];

        handle_message(&state, AppMessage::Logout, &tx).await;
        assert!(!state.session.is_authenticated());
        assert!(state.roles.read().await.is_empty());
    }

    #[tokio::test]
    async fn company_override_wins() {
        let (state, _ui_rx) = test_state();
        sign_in(&state, &[]);
        assert_eq!(state.company_id().await, Some(3));
        state.settings.write().await.company_id = Some(9);
        assert_eq!(state.company_id().await, Some(9));
    }

    #[tokio::test]
    async fn initial_loads_follow_permissions() {
        let (state, _ui_rx) = test_state();
        sign_in(&state, &["USER_VIEW", "USER_CREATE"]);
        assert_eq!(state.initial_loads(), vec![Resource::Users, Resource::Roles]);

        state.session.clear();
        sign_in(&state, &["ROLE_VIEW"]);
        assert_eq!(state.initial_loads(), vec![Resource::Roles, Resource::Permissions]);
    }

    #[tokio::test]
    async fn notices_are_capped() {
        let (state, _ui_rx) = test_state();
        for i in 0..30 {
            state.post_notice(Notice::info(&format!("n{}", i))).await;
        }
        let notices = state.notices.read().await;
        assert_eq!(notices.len(), state.max_notices);
        assert_eq!(notices.front().map(|n| n.text.as_str()), Some("n29"));
    }

    #[tokio::test]
    async fn catalog_updates_translator() {
        let (state, _ui_rx) = test_state();
        let (tx, _rx) = mpsc::channel(8);
        let catalog = Catalog::from([("users.title".to_string(), "Users!".to_string())]);
        handle_message(
            &state,
            AppMessage::CatalogLoaded {
                language: "en".into(),
                catalog,
            },
            &tx,
        )
        .await;
        assert_eq!(state.translator.read().await.t("users.title"), "Users!");
    }
}
