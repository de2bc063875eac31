//! Dashboard page

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Translator;
use crate::models::{Application, Company, User};
use crate::table::PLACEHOLDER;
use crate::ui::theme::Theme;
use crate::utils::format_datetime;

/// Collection sizes shown on the summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub users: usize,
    pub roles: usize,
    pub permissions: usize,
}

/// Snapshot of the session the dashboard describes
#[derive(Debug, Clone, Default)]
pub struct DashboardTab {
    user: Option<User>,
    company: Option<Company>,
    applications: Vec<Application>,
}

impl DashboardTab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_session(&mut self, user: Option<User>, company: Option<Company>, applications: Vec<Application>) {
        self.user = user;
        self.company = company;
        self.applications = applications;
    }

    fn welcome(&self, tr: &Translator) -> Line<'static> {
        let name = self.user.as_ref().map(User::display_name).unwrap_or_default();
        Line::from(vec![
            Span::raw(format!("{}, ", tr.t("dashboard.welcome"))),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, counts: Counts, theme: &Theme, tr: &Translator) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Welcome
                Constraint::Length(4), // Counts
                Constraint::Min(3),    // Applications / activity
            ])
            .split(area);

        let company = self
            .company
            .as_ref()
            .map(|c| c.name.clone())
            .or_else(|| self.user.as_ref().and_then(|u| u.company_name.clone()))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let role = self.user.as_ref().map(|u| u.primary_role().to_string()).unwrap_or_default();
        let last_login = format_datetime(self.user.as_ref().and_then(|u| u.last_login.as_ref()));

        let header = Paragraph::new(vec![
            self.welcome(tr).style(theme.bright()),
            Line::from(vec![
                Span::styled(format!("{}: ", tr.t("common.company")), theme.dim()),
                Span::styled(company, theme.normal()),
                Span::styled(format!("   {}: ", tr.t("common.role")), theme.dim()),
                Span::styled(role, theme.accent()),
            ]),
            Line::from(vec![
                Span::styled(format!("{}: ", tr.t("dashboard.lastLogin")), theme.dim()),
                Span::styled(last_login, theme.normal()),
            ]),
        ])
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border()));
        frame.render_widget(header, chunks[0]);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);
        let card = |title: &str, n: usize| {
            Paragraph::new(Line::from(Span::styled(n.to_string(), theme.highlight()))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(format!(" {} ", title)),
            )
        };
        frame.render_widget(card(tr.t("users.title"), counts.users), cards[0]);
        frame.render_widget(card(tr.t("roles.title"), counts.roles), cards[1]);
        frame.render_widget(card(tr.t("permissions.title"), counts.permissions), cards[2]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let apps: Vec<Line> = if self.applications.is_empty() {
            vec![Line::from(Span::styled(PLACEHOLDER, theme.dim()))]
        } else {
            self.applications
                .iter()
                .map(|app| {
                    let style = if app.active { theme.normal() } else { theme.dim() };
                    Line::from(vec![
                        Span::styled(format!("{:<12}", app.code), theme.accent()),
                        Span::styled(app.name.clone(), style),
                    ])
                })
                .collect()
        };
        frame.render_widget(
            Paragraph::new(apps).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(format!(" {} ", tr.t("dashboard.applications"))),
            ),
            bottom[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(tr.t("dashboard.noActivity").to_string(), theme.dim())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(format!(" {} ", tr.t("dashboard.recentActivity"))),
            ),
            bottom[1],
        );
    }
}
