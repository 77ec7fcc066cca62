// ABOUTME: Help overlay component displaying keyboard shortcuts

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = super::centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Tablero de proyectos:").style(heading),
            ListItem::new("  j/↓        Bajar"),
            ListItem::new("  k/↑        Subir"),
            ListItem::new("  n          Nuevo proyecto"),
            ListItem::new("  r          Recargar lista"),
            ListItem::new("  a          Vista de administración"),
            ListItem::new("  b/Esc      Volver al tablero (administración)"),
            ListItem::new(""),
            ListItem::new("Asistente de nuevo proyecto:").style(heading),
            ListItem::new("  Tab/↓      Campo siguiente"),
            ListItem::new("  S-Tab/↑    Campo anterior"),
            ListItem::new("  ←/→        Mover cursor o cambiar opción"),
            ListItem::new("  Espacio    Marcar/desmarcar casilla"),
            ListItem::new("  Enter      Siguiente paso (o aplicar rutas de archivos)"),
            ListItem::new("  Ctrl+N     Siguiente paso"),
            ListItem::new("  Ctrl+P     Paso anterior"),
            ListItem::new("  Esc        Descartar borrador"),
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  ?          Mostrar/ocultar esta ayuda"),
            ListItem::new("  q          Salir"),
            ListItem::new("  Ctrl+C     Forzar salida"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Ayuda - pulsa ? o Esc para cerrar")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
