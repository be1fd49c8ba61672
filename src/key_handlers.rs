use crate::app::{App, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Side effects the caller must perform after a key is handled. Everything
/// else is applied to the `App` in place, keeping this module free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    Submit(String),
    OpenLink(String),
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    match app.state {
        AppState::Chat => handle_chat_key(app, key),
        AppState::QuitConfirm => handle_quit_confirm_key(app, key),
        AppState::Quit => InputAction::Quit,
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => {
            // Submit control is disabled while a request is in flight.
            if app.pending {
                return InputAction::None;
            }
            if app.input.trim().is_empty() {
                return InputAction::None;
            }
            let query = app.input.drain(..).collect::<String>();
            app.append_user(query.clone());
            app.push_history(query.clone());
            return InputAction::Submit(query);
        }
        KeyCode::Backspace => {
            if !app.pending {
                app.input.pop();
                app.command_index = None;
            }
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if !app.pending {
                app.history_prev();
            }
        }
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if !app.pending {
                app.history_next();
            }
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'c' => app.state = AppState::QuitConfirm,
            'o' => {
                if let Some(url) = app.conversation.last_link() {
                    return InputAction::OpenLink(url.to_string());
                }
                app.logs.add("no file link to open yet".to_string());
            }
            'u' => app.scroll_up(),
            'd' => app.scroll_down(),
            _ => {}
        },
        KeyCode::Char(c) => {
            // Input box is disabled while pending.
            if !app.pending {
                app.input.push(c);
                app.command_index = None;
            }
        }
        _ => {}
    }
    InputAction::None
}

fn handle_quit_confirm_key(app: &mut App, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
            return InputAction::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
    InputAction::None
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}
