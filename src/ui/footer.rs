use crate::ui::app::{App, Focus};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const NAV_HINTS: &str = " ←/→: Select │ Enter: Open │ [ ]: Back/Forward │ Tab: Body │ q: Quit";
const BODY_HINTS: &str = " ↑/↓: Select │ Enter: Log in/Save │ Type: Edit │ Tab/Esc: Nav │ Ctrl+Q: Quit";

pub struct Footer;

impl Footer {
    pub fn widget(app: &App, area: Rect) -> Paragraph<'static> {
        let hints = match app.focus() {
            Focus::Nav => NAV_HINTS,
            Focus::Body => BODY_HINTS,
        };
        let notice = app.notice().map(|n| format!("  {n}")).unwrap_or_default();
        let version = format!("v{} ", VERSION);

        // Char count, not bytes: the hints contain arrows.
        let used = hints.chars().count() + notice.chars().count() + version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width.saturating_sub(used);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(notice, Style::default().fg(STATUS_ERROR)),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
