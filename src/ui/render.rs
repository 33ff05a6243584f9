use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::app::{App, Focus, Widget};
use crate::ui::editor::SaveStatus;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, DISABLED_TEXT, GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let (header, body, footer) = layout_regions(frame.area());

    frame.render_widget(Header::widget(app), header);
    frame.render_widget(Clear, body);
    frame.render_widget(body_widget(app), body);
    frame.render_widget(Footer::widget(app, footer), footer);
}

fn body_widget(app: &App) -> Paragraph<'static> {
    let mut lines: Vec<Line<'static>> = app
        .body_text()
        .unwrap_or_default()
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();

    match app.widget() {
        Some(Widget::UserList) => {
            lines.push(Line::from(""));
            lines.extend(user_list_lines(app));
        }
        Some(Widget::FoodEditor) => {
            lines.push(Line::from(""));
            lines.extend(editor_lines(app));
        }
        None => {}
    }

    Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

fn selected_style(app: &App, pos: usize) -> Style {
    if app.focus() == Focus::Body && pos == app.list_selection() {
        Style::default().bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn user_list_lines(app: &App) -> Vec<Line<'static>> {
    if app.users().is_empty() {
        return vec![Line::from("No accounts available.")];
    }
    app.users()
        .iter()
        .enumerate()
        .map(|(pos, user)| {
            Line::from(vec![
                Span::raw("  • "),
                Span::styled(user.name.clone(), Style::default().fg(HEADER_TEXT)),
            ])
            .style(selected_style(app, pos))
        })
        .collect()
}

fn editor_lines(app: &App) -> Vec<Line<'static>> {
    let editor = app.editor();
    if editor.rows.is_empty() {
        return vec![Line::from("Log in to edit your favourite foods.")];
    }

    let mut lines: Vec<Line<'static>> = editor
        .rows
        .iter()
        .map(|row| {
            let control = if row.saving {
                Span::styled("[saving…]", Style::default().fg(DISABLED_TEXT))
            } else if row.save_enabled {
                Span::styled("[save]", Style::default().fg(STATUS_OK))
            } else {
                Span::styled("[save]", Style::default().fg(DISABLED_TEXT))
            };
            Line::from(vec![
                Span::raw(format!("  {:>2}. ", row.index + 1)),
                Span::styled(format!("{:<24}", row.input), Style::default().fg(HEADER_TEXT)),
                Span::raw(" "),
                control,
            ])
            .style(selected_style(app, row.index))
        })
        .collect();

    if let Some(message) = editor.status.message() {
        let color = match editor.status {
            SaveStatus::Failed => STATUS_ERROR,
            _ => STATUS_OK,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message, Style::default().fg(color))));
    }
    lines
}
