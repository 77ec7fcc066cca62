// ABOUTME: Project wizard rendering: progress header, active step form and alert overlay

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::controller::SubmissionStatus;
use super::panel::{FieldInput, FormField, choice_labels};
use super::state::ProjectWizardState;
use super::step::WizardStep;
use crate::models::{MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

pub struct ProjectWizardComponent;

impl ProjectWizardComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &ProjectWizardState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header with progress
                Constraint::Min(10),   // Form
                Constraint::Length(3), // Navigation footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_form(frame, layout[1], state);
        self.render_navigation(frame, layout[2], state);

        if let Some(ref alert) = state.alert {
            self.render_alert(frame, area, alert);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &ProjectWizardState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let step = state.current_step();
        let title = Paragraph::new(Line::from(vec![
            Span::styled("🌱 ", Style::default()),
            Span::styled(
                "Nuevo proyecto de aparcería",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Paso {} de {}", step.number(), WizardStep::total()),
                Style::default().fg(MUTED_GRAY),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let current_idx = step.index();
        let mut spans = Vec::new();
        for (idx, s) in WizardStep::all().iter().enumerate() {
            let (icon, style) = if idx < current_idx {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_idx {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };
            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                s.title(),
                if idx == current_idx {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));
            if idx + 1 < WizardStep::total() {
                spans.push(Span::styled("  ─  ", Style::default().fg(SUBDUED_BORDER)));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            rows[1],
        );
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, state: &ProjectWizardState) {
        let step = state.current_step();
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", step.title()),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let panel = state.panel();
        let required = step.required_fields();

        let mut lines = vec![
            Line::from(Span::styled(step.description(), Style::default().fg(MUTED_GRAY))),
            Line::from(""),
        ];

        for (idx, field) in panel.fields().iter().enumerate() {
            let focused = idx == panel.focus();
            let marker = if focused { "▸ " } else { "  " };
            let mut label = field.field.label().to_string();
            if required.contains(&field.field) {
                label.push_str(" *");
            }

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(
                    format!("{label}: "),
                    if focused {
                        Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(MUTED_GRAY)
                    },
                ),
                Self::value_span(field, focused),
            ]));

            if let FieldInput::Files { selected, input } = &field.input {
                for attachment in selected {
                    lines.push(Line::from(Span::styled(
                        format!("      📎 {} ({})", attachment.file_name, attachment.mime_type),
                        Style::default().fg(SOFT_WHITE),
                    )));
                }
                if focused {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "      Ruta: {}▌  (Enter para seleccionar, máx. {} archivos de {} MB)",
                            input.value(),
                            MAX_ATTACHMENTS,
                            MAX_ATTACHMENT_BYTES / (1024 * 1024)
                        ),
                        Style::default().fg(CORNFLOWER_BLUE),
                    )));
                }
            }
        }

        if state.status() == SubmissionStatus::InFlight {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "⏳ Enviando proyecto...",
                Style::default().fg(WARNING_YELLOW),
            )));
        } else if let Some(ref err) = state.submit_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("❌ No se pudo crear el proyecto: {err}"),
                Style::default().fg(ERROR_RED),
            )));
        }

        let form = Paragraph::new(lines).wrap(Wrap { trim: false });
        let padded = Rect {
            x: inner.x + 1,
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: inner.height,
        };
        frame.render_widget(form, padded);
    }

    fn value_span(field: &FormField, focused: bool) -> Span<'static> {
        match &field.input {
            FieldInput::Text(text) => {
                let mut value = text.value().to_string();
                if focused {
                    let at = value
                        .char_indices()
                        .nth(text.cursor())
                        .map_or(value.len(), |(i, _)| i);
                    value.insert(at, '▌');
                }
                Span::styled(value, Style::default().fg(SOFT_WHITE))
            }
            FieldInput::Choice(idx) => {
                let options = choice_labels(field.field);
                let label = idx
                    .and_then(|i| options.get(i).copied())
                    .unwrap_or("Selecciona una opción");
                Span::styled(
                    format!("◀ {label} ▶"),
                    Style::default().fg(if idx.is_some() { SOFT_WHITE } else { MUTED_GRAY }),
                )
            }
            FieldInput::Toggle(on) => Span::styled(
                if *on { "[x]" } else { "[ ]" },
                Style::default().fg(if *on { SELECTION_GREEN } else { MUTED_GRAY }),
            ),
            FieldInput::Files { .. } => {
                Span::styled(field.display_value(), Style::default().fg(SOFT_WHITE))
            }
        }
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &ProjectWizardState) {
        let step = state.current_step();
        let next_label = if step.is_last() { "Crear proyecto" } else { "Siguiente" };

        let mut spans = vec![];
        if step.previous().is_some() {
            spans.push(Span::styled("Ctrl+P", Style::default().fg(GOLD)));
            spans.push(Span::styled(" Anterior   ", Style::default().fg(MUTED_GRAY)));
        }
        spans.push(Span::styled("Ctrl+N", Style::default().fg(GOLD)));
        spans.push(Span::styled(format!(" {next_label}   "), Style::default().fg(MUTED_GRAY)));
        spans.push(Span::styled("Tab", Style::default().fg(GOLD)));
        spans.push(Span::styled(" Campo   ", Style::default().fg(MUTED_GRAY)));
        spans.push(Span::styled("Esc", Style::default().fg(GOLD)));
        spans.push(Span::styled(" Cancelar", Style::default().fg(MUTED_GRAY)));

        let footer = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG)),
            );
        frame.render_widget(footer, area);
    }

    fn render_alert(&self, frame: &mut Frame, area: Rect, message: &str) {
        let width = 60.min(area.width.saturating_sub(4));
        let height = 7.min(area.height);
        let dialog = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog);
        let block = Block::default()
            .title(" Atención ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(WARNING_YELLOW))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let text = vec![
            Line::from(Span::styled(message.to_string(), Style::default().fg(SOFT_WHITE))),
            Line::from(""),
            Line::from(Span::styled(
                "[ Aceptar ]",
                Style::default().fg(Color::Black).bg(SOFT_WHITE),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}

impl Default for ProjectWizardComponent {
    fn default() -> Self {
        Self::new()
    }
}
