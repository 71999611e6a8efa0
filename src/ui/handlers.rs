use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui_textarea::{Input, Key};

use crate::app::{AppState, InputMode};

pub fn handle_key_event(app_state: &mut AppState, key: KeyEvent) {
    match app_state.input_mode {
        InputMode::Normal => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::SUPER)
            {
                handle_ctrl_key(app_state, key.code);
            } else {
                handle_normal_mode(app_state, key.code);
            }
        }
        InputMode::Notes => handle_notes_mode(app_state, key),
        InputMode::Command => handle_command_mode(app_state, key.code),
        InputMode::ConfirmClear => handle_confirm_mode(app_state, key.code),
        InputMode::Help => handle_help_mode(app_state, key.code),
    }
}

// Handles both Ctrl+key and Command+key (on Mac) combinations
fn handle_ctrl_key(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('s') => app_state.save(),
        KeyCode::Char('n') => app_state.add_row(),
        KeyCode::Char('d') => app_state.remove_row(),
        KeyCode::Char('e') => app_state.start_notes_editing(),
        KeyCode::Char('q') => app_state.quit(),
        _ => {}
    }
}

fn handle_normal_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Char(':') => app_state.start_command_mode(),
        KeyCode::Char(c) => app_state.type_into_cell(c),
        KeyCode::Backspace => app_state.backspace_cell(),
        KeyCode::Delete => app_state.clear_current_cell(),
        KeyCode::Tab => app_state.next_cell(),
        KeyCode::BackTab => app_state.prev_cell(),
        KeyCode::Left => app_state.move_cursor(0, -1),
        KeyCode::Right => app_state.move_cursor(0, 1),
        KeyCode::Up => app_state.move_cursor(-1, 0),
        KeyCode::Down => app_state.move_cursor(1, 0),
        KeyCode::Home => app_state.jump_to_first_row(),
        KeyCode::End => app_state.jump_to_last_row(),
        KeyCode::F(1) => app_state.show_help(),
        _ => {}
    }
}

fn handle_command_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app_state.execute_command(),
        KeyCode::Esc => app_state.cancel_input(),
        KeyCode::Backspace => app_state.delete_char_from_input(),
        KeyCode::Char(c) => app_state.add_char_to_input(c),
        _ => {}
    }
}

fn handle_confirm_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app_state.answer_clear(true),
        _ => app_state.answer_clear(false),
    }
}

fn handle_notes_mode(app_state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app_state.confirm_notes(),
        _ => {
            let input = Input {
                key: key_code_to_textarea_key(key.code),
                ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
                alt: key.modifiers.contains(KeyModifiers::ALT),
            };
            app_state.text_area.input(input);
        }
    }
}

// Convert crossterm::event::KeyCode to ratatui_textarea::Key
fn key_code_to_textarea_key(key_code: KeyCode) -> Key {
    match key_code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    }
}

fn handle_help_mode(app_state: &mut AppState, key_code: KeyCode) {
    let line_count = app_state.help_text.lines().count();
    let max_scroll = line_count.saturating_sub(app_state.help_visible_lines);

    match key_code {
        KeyCode::Enter | KeyCode::Esc => {
            app_state.input_mode = InputMode::Normal;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app_state.help_scroll = (app_state.help_scroll + 1).min(max_scroll);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app_state.help_scroll = app_state.help_scroll.saturating_sub(1);
        }
        KeyCode::Home => app_state.help_scroll = 0,
        KeyCode::End => app_state.help_scroll = max_scroll,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::sheet::SheetManager;
    use crate::store::MemoryStore;
    use std::path::PathBuf;

    fn app() -> AppState<'static> {
        let manager = SheetManager::new(SheetConfig::default(), Box::new(MemoryStore::new()));
        AppState::new(manager, PathBuf::from("."))
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut AppState, c: char) {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_letters_fill_cells() {
        let mut app = app();
        for c in "ab1c".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.get_cell_content(0, 0), "A");
        assert_eq!(app.get_cell_content(0, 1), "B");
        assert_eq!(app.get_cell_content(0, 2), "C");
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut app = app();
        ctrl(&mut app, 'n');
        assert_eq!(app.row_count(), 7);
        ctrl(&mut app, 'd');
        ctrl(&mut app, 'd');
        assert_eq!(app.row_count(), 5);
        ctrl(&mut app, 's');
        assert!(!app.is_modified);
    }

    #[test]
    fn test_confirm_mode_only_accepts_y() {
        let mut app = app();
        press(&mut app, KeyCode::Char('z'));
        app.request_clear();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.get_cell_content(0, 0), "Z");
        assert!(matches!(app.input_mode, InputMode::Normal));

        app.request_clear();
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.get_cell_content(0, 0), "");
    }

    #[test]
    fn test_command_mode_via_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        for c in "ar".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.row_count(), 7);
    }
}
