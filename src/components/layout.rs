// ABOUTME: Main layout component routing views, status bar, key menu and overlays

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

// Premium color palette (TUI Style Guide)
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const ERROR_RED: Color = Color::Rgb(230, 100, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

use super::{HelpComponent, ProjectListComponent, ProjectWizardComponent};
use crate::app::{
    AppState,
    state::{NotificationType, View},
};
use crate::models::Role;

pub struct LayoutComponent {
    project_list: ProjectListComponent,
    project_wizard: ProjectWizardComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            project_list: ProjectListComponent::new(),
            project_wizard: ProjectWizardComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &mut AppState) {
        let area = frame.size();

        if state.current_view == View::ProjectWizard {
            // Full screen wizard
            if let Some(ref wizard) = state.wizard_state {
                self.project_wizard.render(frame, area, wizard);
            }
        } else {
            let show_menu = state.app_config.ui.show_help_footer;
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),                                  // Status bar
                    Constraint::Min(5),                                     // Project list
                    Constraint::Length(if show_menu { 3 } else { 0 }),      // Key menu
                ])
                .split(area);

            self.render_status_bar(frame, chunks[0], state);
            self.project_list.render(frame, chunks[1], state);
            if show_menu {
                self.render_menu_bar(frame, chunks[2], state);
            }
        }

        if state.help_visible {
            self.help.render(frame, area);
        }

        self.render_notifications(frame, area, state);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled("🌾 ", Style::default().fg(GOLD)),
            Span::styled("Aparcería", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", Style::default().fg(SUBDUED_BORDER)),
        ];

        match state.session.user() {
            Some(user) => {
                spans.push(Span::styled("👤 ", Style::default().fg(SELECTION_GREEN)));
                spans.push(Span::styled(user.name.clone(), Style::default().fg(SOFT_WHITE)));
                let role_color = if user.role == Role::Admin { WARNING_ORANGE } else { MUTED_GRAY };
                spans.push(Span::styled(
                    format!(" ({})", user.role.label()),
                    Style::default().fg(role_color),
                ));
            }
            None => spans.push(Span::styled("Sin sesión", Style::default().fg(MUTED_GRAY))),
        }

        spans.push(Span::styled("  │  ", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(
            state.app_config.api.base_url.clone(),
            Style::default().fg(MUTED_GRAY),
        ));

        let status = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(CORNFLOWER_BLUE))
                .style(Style::default().bg(DARK_BG)),
        );

        frame.render_widget(status, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let label = |l: &'static str| Span::styled(l, Style::default().fg(MUTED_GRAY));
        let separator = || Span::styled(" │ ", Style::default().fg(SUBDUED_BORDER));

        let mut spans = vec![
            key("n", GOLD),
            label(" nuevo proyecto "),
            key("r", GOLD),
            label(" recargar "),
            key("j/k", GOLD),
            label(" mover"),
            separator(),
        ];

        if state.current_view == View::AdminProjects {
            spans.push(key("b", WARNING_ORANGE));
            spans.push(label(" volver"));
            spans.push(separator());
        } else if state.session.is_admin() {
            spans.push(key("a", WARNING_ORANGE));
            spans.push(label(" administración"));
            spans.push(separator());
        }

        spans.extend([
            key("?", CORNFLOWER_BLUE),
            label(" ayuda "),
            key("q", CORNFLOWER_BLUE),
            label(" salir"),
        ]);

        let menu = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let notifications = state.get_current_notifications();
        if notifications.is_empty() {
            return;
        }

        // Top-right corner, 3 lines per notification
        let notification_width = 50.min(area.width.saturating_sub(2));
        let notification_height = notifications.len() as u16 * 3;

        let notification_area = Rect {
            x: area.width.saturating_sub(notification_width + 2),
            y: 1,
            width: notification_width,
            height: notification_height.min(area.height.saturating_sub(2)),
        };

        for (i, notification) in notifications.iter().enumerate() {
            let y_offset = i as u16 * 3;
            if y_offset >= notification_area.height {
                break;
            }

            let single_area = Rect {
                x: notification_area.x,
                y: notification_area.y + y_offset,
                width: notification_area.width,
                height: 3.min(notification_area.height - y_offset),
            };

            let (icon, color) = match notification.notification_type {
                NotificationType::Success => ("✓ ", SELECTION_GREEN),
                NotificationType::Error => ("✗ ", ERROR_RED),
                NotificationType::Warning => ("⚠ ", WARNING_ORANGE),
                NotificationType::Info => ("ℹ ", CORNFLOWER_BLUE),
            };

            let line = Line::from(vec![
                Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(notification.message.as_str(), Style::default().fg(color)),
            ]);

            let widget = Paragraph::new(line)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .style(Style::default().bg(PANEL_BG)),
                )
                .wrap(ratatui::widgets::Wrap { trim: true });

            frame.render_widget(widget, single_area);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
