//! Main TUI application

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};

use crate::app::actions::Request;
use crate::app::events::{is_force_quit, tab_delta, tab_number, AppEvent, EventHandler};
use crate::app::state::{AppMessage, AppState, NoticeLevel, Resource, UiUpdateSignal};
use crate::config::KeyBindings;
use crate::i18n::Translator;
use crate::menu::console_navigation;
use crate::models::MenuItem;
use crate::permissions::Capabilities;
use crate::session::Session;
use crate::ui::dialogs::confirm::ConfirmDialog;
use crate::ui::dialogs::login::LoginForm;
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::tabs::{
    dashboard::{Counts, DashboardTab},
    permissions::PermissionsTab,
    roles::RolesTab,
    send_request,
    users::UsersTab,
    Page,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::menu::render_menu;
use crate::ui::widgets::statusbar::{build_status_line, StatusItem};

const SIDEBAR_WIDTH: u16 = 24;

/// Main TUI application
pub struct TuiApp {
    state: Arc<AppState>,
    state_tx: mpsc::Sender<AppMessage>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    ui_update_rx: broadcast::Receiver<UiUpdateSignal>,
    keys: KeyBindings,

    // Snapshots refreshed on signals
    tr: Translator,
    caps: Capabilities,
    session: Option<Session>,
    nav: Vec<MenuItem>,
    pages: Vec<Page>,

    // UI state
    current_page: usize,
    base_theme: Theme,
    theme: Theme,
    show_help: bool,
    logout_confirm: Option<ConfirmDialog>,
    login: LoginForm,

    // Pages
    dashboard_tab: DashboardTab,
    users_tab: UsersTab,
    roles_tab: RolesTab,
    permissions_tab: PermissionsTab,
}

impl TuiApp {
    pub async fn new(state: Arc<AppState>, state_tx: mpsc::Sender<AppMessage>) -> Result<Self> {
        let (page_size, base_theme) = {
            let settings = state.settings.read().await;
            (settings.page_size(), Theme::named(&settings.theme))
        };
        let tr = state.translator.read().await.clone();
        let caps = Capabilities::of(&state.session);

        let users_tab = UsersTab::new(page_size, &tr, caps)?;
        let roles_tab = RolesTab::new(page_size, &tr, caps)?;
        let permissions_tab = PermissionsTab::new(page_size, &tr)?;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let ui_update_rx = state.ui_update_tx.subscribe();

        let mut app = Self {
            state,
            state_tx,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            ui_update_rx,
            keys: KeyBindings::default(),

            tr,
            caps,
            session: None,
            nav: Vec::new(),
            pages: Vec::new(),

            current_page: 0,
            theme: base_theme.clone(),
            base_theme,
            show_help: false,
            logout_confirm: None,
            login: LoginForm::new(),

            dashboard_tab: DashboardTab::new(),
            users_tab,
            roles_tab,
            permissions_tab,
        };
        app.session_changed()?;
        Ok(app)
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Check for UI update signals
            loop {
                match self.ui_update_rx.try_recv() {
                    Ok(signal) => self.apply_signal(signal).await?,
                    Err(broadcast::error::TryRecvError::Lagged(n)) => {
                        tracing::warn!("UI lagged {} signals, reloading everything", n);
                        self.reload_all().await?;
                    }
                    Err(_) => break,
                }
            }

            // Draw UI
            self.draw()?;

            // Handle input events
            if let Some(event) = self.event_handler.next() {
                match event {
                    AppEvent::Key(key) => {
                        if is_force_quit(&key) {
                            break;
                        }
                        if self.handle_key(key).await {
                            break;
                        }
                    }
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {}
                }
            }
        }

        Ok(())
    }

    async fn apply_signal(&mut self, signal: UiUpdateSignal) -> Result<()> {
        match signal {
            UiUpdateSignal::SessionChanged => self.session_changed()?,
            UiUpdateSignal::UsersUpdated => self.users_tab.update_users(&self.state).await,
            UiUpdateSignal::RolesUpdated => {
                self.users_tab.update_roles(&self.state).await;
                self.roles_tab.update_roles(&self.state).await;
            }
            UiUpdateSignal::PermissionsUpdated => {
                self.roles_tab.update_permissions(&self.state).await;
                self.permissions_tab.update_permissions(&self.state).await;
            }
            UiUpdateSignal::TranslationsUpdated => {
                self.tr = self.state.translator.read().await.clone();
                self.refresh_columns()?;
            }
            UiUpdateSignal::NoticePosted => {
                // A failed sign-in comes back as an error notice
                if self.session.is_none() {
                    if let Some(notice) = self.state.current_notice() {
                        if notice.level == NoticeLevel::Error {
                            self.login.error = Some(notice.text);
                        }
                    }
                    self.login.submitting = false;
                }
            }
        }
        Ok(())
    }

    async fn reload_all(&mut self) -> Result<()> {
        for signal in [
            UiUpdateSignal::SessionChanged,
            UiUpdateSignal::TranslationsUpdated,
            UiUpdateSignal::UsersUpdated,
            UiUpdateSignal::RolesUpdated,
            UiUpdateSignal::PermissionsUpdated,
        ] {
            self.apply_signal(signal).await?;
        }
        Ok(())
    }

    fn session_changed(&mut self) -> Result<()> {
        let current = self.pages.get(self.current_page).copied();

        self.session = self.state.session.with(Session::clone);
        self.caps = Capabilities::of(&self.state.session);
        self.nav = console_navigation(self.session.as_ref());
        self.pages = Page::visible(&self.nav, self.session.as_ref());
        self.current_page = current
            .and_then(|p| self.pages.iter().position(|x| *x == p))
            .unwrap_or(0);

        self.theme = match self.session.as_ref().and_then(|s| s.theme.as_ref()) {
            Some(spec) => Theme::from_spec(&self.base_theme, spec),
            None => self.base_theme.clone(),
        };

        match &self.session {
            Some(session) => {
                self.login = LoginForm::new();
                self.dashboard_tab.update_session(
                    session.user.clone(),
                    session.company.clone(),
                    session.applications.clone(),
                );
            }
            None => {
                self.login.reset();
                self.logout_confirm = None;
                self.dashboard_tab.update_session(None, None, Vec::new());
            }
        }
        self.refresh_columns()
    }

    fn refresh_columns(&mut self) -> Result<()> {
        self.users_tab.refresh_columns(&self.tr, self.caps)?;
        self.roles_tab.refresh_columns(&self.tr, self.caps)?;
        self.permissions_tab.refresh_labels(&self.tr);
        Ok(())
    }

    fn page(&self) -> Option<Page> {
        self.pages.get(self.current_page).copied()
    }

    /// Current page owns the keyboard (dialog open or search typing)
    fn capturing_input(&self) -> bool {
        match self.page() {
            Some(Page::Users) => self.users_tab.capturing_input(),
            Some(Page::Roles) => self.roles_tab.capturing_input(),
            Some(Page::Permissions) => self.permissions_tab.capturing_input(),
            Some(Page::Dashboard) | None => false,
        }
    }

    /// Returns true when the app should exit
    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.session.is_none() {
            if let Some(submit) = self.login.handle_key(key) {
                tracing::info!(username = %submit.username, "signing in");
                send_request(
                    &self.state_tx,
                    Request::Login {
                        username: submit.username,
                        password: submit.password,
                    },
                )
                .await;
            }
            return false;
        }

        if self.show_help {
            self.show_help = false;
            return false;
        }

        if let Some(dialog) = &mut self.logout_confirm {
            if dialog.handle_key(key) {
                if dialog.confirmed() {
                    let _ = self.state_tx.send(AppMessage::Logout).await;
                }
                self.logout_confirm = None;
            }
            return false;
        }

        if !self.capturing_input() {
            if self.keys.quit.matches_event(&key) {
                return true;
            }
            if self.keys.help.matches_event(&key) || key.code == KeyCode::F(1) {
                self.show_help = true;
                return false;
            }
            if self.keys.logout.matches_event(&key) {
                self.logout_confirm = Some(
                    ConfirmDialog::new(self.tr.t("common.logout"), self.tr.t("common.confirmLogout"))
                        .with_labels(self.tr.t("common.yes"), self.tr.t("common.no")),
                );
                return false;
            }
            if self.keys.language.matches_event(&key) {
                self.cycle_language().await;
                return false;
            }
            if self.keys.refresh.matches_event(&key) {
                self.refresh_page().await;
                return false;
            }
            if let Some(n) = tab_number(&key) {
                if n < self.pages.len() {
                    self.current_page = n;
                }
                return false;
            }
            if let Some(delta) = tab_delta(&key, &self.keys) {
                if !self.pages.is_empty() {
                    let len = self.pages.len() as i32;
                    self.current_page = (self.current_page as i32 + delta).rem_euclid(len) as usize;
                }
                return false;
            }
        }

        match self.page() {
            Some(Page::Users) => {
                self.users_tab
                    .handle_key(key, &self.state, &self.state_tx, &self.keys, &self.tr)
                    .await
            }
            Some(Page::Roles) => {
                self.roles_tab
                    .handle_key(key, &self.state, &self.state_tx, &self.keys, &self.tr)
                    .await
            }
            Some(Page::Permissions) => self.permissions_tab.handle_key(key, &self.keys),
            Some(Page::Dashboard) | None => {}
        }
        false
    }

    async fn cycle_language(&mut self) {
        let languages = self.tr.available_languages();
        if languages.is_empty() {
            return;
        }
        let next = languages
            .iter()
            .position(|l| l == self.tr.language())
            .map(|i| (i + 1) % languages.len())
            .unwrap_or(0);
        let language = languages[next].clone();
        tracing::info!(%language, "changing language");
        let _ = self.state_tx.send(AppMessage::ChangeLanguage(language)).await;
    }

    async fn refresh_page(&mut self) {
        let resources: &[Resource] = match self.page() {
            Some(Page::Users) => &[Resource::Users, Resource::Roles],
            Some(Page::Roles) => &[Resource::Roles, Resource::Permissions],
            Some(Page::Permissions) => &[Resource::Permissions],
            Some(Page::Dashboard) | None => &[],
        };
        for resource in resources {
            send_request(&self.state_tx, Request::Load(*resource)).await;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let notice = self.state.current_notice();
        let in_flight = self.state.in_flight();
        let counts = Counts {
            users: self.users_tab.user_count(),
            roles: self.roles_tab.role_count(),
            permissions: self.permissions_tab.permission_count(),
        };
        let page = self.page();

        let Self {
            terminal,
            tr,
            theme,
            session,
            nav,
            pages,
            current_page,
            show_help,
            logout_confirm,
            login,
            dashboard_tab,
            users_tab,
            roles_tab,
            permissions_tab,
            ..
        } = self;
        let (tr, theme, session, nav, pages) = (&*tr, &*theme, &*session, &*nav, &*pages);
        let (current_page, show_help) = (*current_page, *show_help);

        terminal.draw(|frame| {
            let Some(session) = session.as_ref() else {
                frame.render_widget(Block::default().style(theme.normal()), frame.area());
                login.render(frame, theme, tr);
                return;
            };

            let layout = AppLayout::new(frame.area(), SIDEBAR_WIDTH);

            // Header
            let user = session.user.as_ref().map(|u| u.display_name()).unwrap_or_default();
            let company = session.company.as_ref().map(|c| c.name.clone()).unwrap_or_default();
            let header = Line::from(vec![
                Span::styled(
                    format!(" {} ", tr.t("common.adminPanel")),
                    theme.accent().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", company), theme.dim()),
                Span::styled(format!(" {} ", user), theme.bright()),
            ]);
            frame.render_widget(Paragraph::new(header), layout.header);

            // Tab bar
            let titles: Vec<Line> = pages
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let style = if i == current_page {
                        theme.tab_active()
                    } else {
                        theme.tab_inactive()
                    };
                    Line::from(Span::styled(format!(" {} {} ", i + 1, tr.t(p.title_key())), style))
                })
                .collect();
            let tabs = Tabs::new(titles)
                .select(current_page)
                .highlight_style(theme.tab_active())
                .divider("|");
            frame.render_widget(tabs, layout.tabs);

            // Sidebar: console pages, then whatever the backend granted
            let mut menu = nav.clone();
            menu.extend(session.menus.iter().cloned());
            render_menu(
                frame,
                layout.sidebar,
                &menu,
                Some(session),
                page.map(Page::code),
                theme,
                tr,
            );

            // Content
            match page {
                Some(Page::Dashboard) => dashboard_tab.render(frame, layout.content, counts, theme, tr),
                Some(Page::Users) => users_tab.render(frame, layout.content, theme, tr),
                Some(Page::Roles) => roles_tab.render(frame, layout.content, theme, tr),
                Some(Page::Permissions) => permissions_tab.render(frame, layout.content, theme, tr),
                None => {}
            }

            // Status bar
            let mut items = Vec::new();
            if let Some(notice) = &notice {
                let style = match notice.level {
                    NoticeLevel::Info => theme.accent(),
                    NoticeLevel::Success => theme.success(),
                    NoticeLevel::Error => theme.error(),
                };
                items.push(StatusItem::text(&notice.text).with_style(style));
            }
            if in_flight > 0 {
                items.push(StatusItem::text(tr.t("common.loading")).with_style(theme.dim()));
            }
            items.push(StatusItem::new(tr.t("common.language"), tr.language()).with_style(theme.normal()));
            items.push(StatusItem::text("?=help g=lang L=logout q=quit").with_style(theme.dim()));
            frame.render_widget(Paragraph::new(build_status_line(items, "│")), layout.status);

            if show_help {
                render_help(frame, theme);
            }
            if let Some(dialog) = logout_confirm.as_ref() {
                dialog.render(frame, theme);
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let help_area = DialogLayout::centered(area, 60, 24).dialog;

    let help_text = [
        "",
        "  BizCore Admin - Keyboard Shortcuts",
        "  ────────────────────────────────────",
        "",
        "  Navigation:",
        "    1-9, Tab      Switch pages",
        "    ↑/↓           Move row cursor",
        "    PgUp/PgDn     Previous/next page",
        "    Home/End      First/last page",
        "",
        "  Tables:",
        "    /             Search (Esc clears)",
        "    [ ]           Pick column, o to sort",
        "    n / e / d     New, edit, delete",
        "    Space         Activate/deactivate user",
        "    m             Cycle permission module",
        "",
        "  General:",
        "    r  refresh    g  language",
        "    L  logout     q  quit",
        "",
        "  Press any key to close",
    ];

    let help_block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.normal());

    let help_content = Paragraph::new(help_text.join("\n"))
        .block(help_block)
        .style(theme.normal());

    frame.render_widget(Clear, help_area);
    frame.render_widget(help_content, help_area);
}
