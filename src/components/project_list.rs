// ABOUTME: Project board component listing community (or all, for admins) projects

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

// Premium color palette (TUI Style Guide)
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const LIST_HIGHLIGHT_BG: Color = Color::Rgb(40, 40, 60);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);

use crate::app::{AppState, state::View};
use crate::models::Project;

pub struct ProjectListComponent {
    list_state: ListState,
}

impl Default for ProjectListComponent {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }
}

impl ProjectListComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.list_state.select(state.selected_project_index);

        let projects = state.visible_projects();
        let admin = state.current_view == View::AdminProjects;
        let (icon, title) = if admin {
            (" 🛡 ", "Todos los proyectos ")
        } else {
            (" 🌾 ", "Proyectos de la comunidad ")
        };

        let mut title_spans = vec![
            Span::styled(icon, Style::default().fg(GOLD)),
            Span::styled(title, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("({})", projects.len()),
                Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD),
            ),
        ];
        if state.loading.is_some() {
            title_spans.push(Span::styled(" ⟳", Style::default().fg(WARNING_ORANGE)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if admin { WARNING_ORANGE } else { SELECTION_GREEN }))
            .style(Style::default().bg(DARK_BG))
            .title(Line::from(title_spans));

        if projects.is_empty() {
            let message = if state.loading.is_some() {
                "Cargando proyectos..."
            } else {
                "Todavía no hay proyectos. Pulsa n para crear el primero."
            };
            let empty = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(MUTED_GRAY),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = projects.iter().map(Self::build_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(LIST_HIGHLIGHT_BG).add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn build_item(project: &Project) -> ListItem<'static> {
        let mut first = vec![Span::styled(
            project.name.clone(),
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
        )];
        if !project.publish_to_community {
            first.push(Span::styled("  (privado)", Style::default().fg(MUTED_GRAY)));
        }

        let mut details = Vec::new();
        if !project.location.is_empty() {
            details.push(format!("📍 {}", project.location));
        }
        if !project.partnership_type.is_empty() {
            details.push(project.partnership_type.clone());
        }
        if !project.expected_participants.is_empty() {
            details.push(format!("👥 {}", project.expected_participants));
        }
        if let Some(created) = project.created_at {
            details.push(created.format("%Y-%m-%d").to_string());
        }

        ListItem::new(vec![
            Line::from(first),
            Line::from(Span::styled(
                format!("   {}", details.join("  ·  ")),
                Style::default().fg(MUTED_GRAY),
            )),
        ])
    }
}
