use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::{App, Command, Focus};

/// Applies one key press. Returns a command when the key started a
/// request.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return None;
    }

    // History works from anywhere.
    if key.modifiers.contains(KeyModifiers::ALT) {
        match key.code {
            KeyCode::Left => app.back(),
            KeyCode::Right => app.forward(),
            _ => {}
        }
        return None;
    }

    if key.code == KeyCode::Tab {
        app.toggle_focus();
        return None;
    }

    match app.focus() {
        Focus::Nav => {
            match key.code {
                KeyCode::Left => app.move_nav_selection(-1),
                KeyCode::Right => app.move_nav_selection(1),
                KeyCode::Enter => app.activate_nav(),
                KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
                KeyCode::Char('[') => app.back(),
                KeyCode::Char(']') => app.forward(),
                _ => {}
            }
            None
        }
        Focus::Body => match key.code {
            KeyCode::Up => {
                app.move_list_selection(-1);
                None
            }
            KeyCode::Down => {
                app.move_list_selection(1);
                None
            }
            KeyCode::Enter => app.activate_list(),
            KeyCode::Backspace => {
                app.backspace();
                None
            }
            KeyCode::Esc => {
                app.toggle_focus();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.type_char(c);
                None
            }
            _ => None,
        },
    }
}

fn is_ctrl_char(key: KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&ch))
}
