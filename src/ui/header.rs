use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::app::{App, Focus};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, DISABLED_TEXT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT,
};

/// Nav bar: one entry per shown button, window title as block title.
pub struct Header;

impl Header {
    pub fn widget(app: &App) -> Paragraph<'static> {
        let router = app.router();
        let mut spans = vec![Span::raw(" ")];
        for (pos, button) in router.shown_buttons().enumerate() {
            if pos > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(HEADER_SEPARATOR)));
            }
            let mut style = if button.enabled {
                Style::default().fg(HEADER_TEXT)
            } else {
                Style::default().fg(DISABLED_TEXT).add_modifier(Modifier::UNDERLINED)
            };
            if app.focus() == Focus::Nav && pos == app.nav_selection() {
                style = style.bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(button.screen.clone(), style));
        }

        let title = match app.user() {
            Some(user) => format!(" {} · {} ", router.window_title, user.name),
            None => format!(" {} ", router.window_title),
        };

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER))
                .title(Span::styled(title, Style::default().fg(ACCENT))),
        )
    }
}
