use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use fission_core::{Config, SAMPLE_QUESTIONS};
use ratatui::layout::Rect;

use crate::app::{App, InputMode, Screen};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, config: &mut Config, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, config, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Speech(speech) => app.handle_speech_event(speech),
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_answer().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, config: &mut Config, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Popups take all keys while open
    if app.show_level_picker {
        handle_level_picker(app, key);
        return;
    }
    if app.show_accessibility_menu {
        handle_accessibility_menu(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, config, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_level_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.show_level_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.level_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.level_picker_nav_up(),
        KeyCode::Enter => app.select_level(),
        _ => {}
    }
}

fn handle_accessibility_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.show_accessibility_menu = false,
        KeyCode::Char('j') | KeyCode::Down => app.accessibility_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.accessibility_nav_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.apply_accessibility_item(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, config: &mut Config, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.toggle_screen(),
        KeyCode::Char('r') => app.open_level_picker(),
        KeyCode::Char('a') => app.open_accessibility_menu(),
        KeyCode::Char('c') => app.accessibility.toggle_contrast_mode(),
        KeyCode::Char('p') => app.switch_provider(config),
        KeyCode::Char('s') => app.toggle_voice_output(),
        _ => match app.screen {
            Screen::Timeline => handle_timeline_normal(app, key),
            Screen::Chat => handle_chat_normal(app, key),
        },
    }
}

fn handle_timeline_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => app.select_next_event(),
        KeyCode::Char('h') | KeyCode::Left => app.select_previous_event(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first_event(),
        KeyCode::Char('G') | KeyCode::End => app.select_last_event(),
        KeyCode::Char(']') => app.window.scroll_right(),
        KeyCode::Char('[') => app.window.scroll_left(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_detail_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_detail_up(),
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.screen = Screen::Chat;
            app.input_mode = InputMode::Editing;
        }
        _ => {}
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.input_mode = InputMode::Editing,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_chat_to_bottom(),
        KeyCode::Char('v') => app.toggle_voice_input(),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let index = (c as usize).wrapping_sub('1' as usize);
            if index < SAMPLE_QUESTIONS.len() {
                app.fill_sample_question(index);
            }
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.send_message();
        }
        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.cursor);
            app.input.insert(byte_pos, c);
            app.cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_navigator = app.navigator_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_detail = app.detail_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if app.screen == Screen::Timeline => {
            let clicked = app
                .year_areas
                .iter()
                .find(|(rect, _)| point_in_rect(x, y, *rect))
                .map(|(_, index)| *index);
            if let Some(index) = clicked {
                app.select_event(index);
            }
        }
        MouseEventKind::ScrollDown => match app.screen {
            Screen::Timeline if in_navigator => app.window.scroll_right(),
            Screen::Timeline if in_detail => {
                for _ in 0..3 {
                    app.scroll_detail_down();
                }
            }
            Screen::Chat if in_chat => app.chat_scroll = app.chat_scroll.saturating_add(3),
            _ => {}
        },
        MouseEventKind::ScrollUp => match app.screen {
            Screen::Timeline if in_navigator => app.window.scroll_left(),
            Screen::Timeline if in_detail => {
                for _ in 0..3 {
                    app.scroll_detail_up();
                }
            }
            Screen::Chat if in_chat => app.chat_scroll = app.chat_scroll.saturating_sub(3),
            _ => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use fission_core::MemoryStore;
    use tokio::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Press;
        key
    }

    fn test_app() -> (App, Config) {
        let config = Config {
            response_delay_ms: Some(0),
            ..Config::new()
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        (App::new(&config, Box::new(MemoryStore::new()), tx), config)
    }

    #[test]
    fn test_char_to_byte_index_handles_multibyte() {
        assert_eq!(char_to_byte_index("héllo", 0), 0);
        assert_eq!(char_to_byte_index("héllo", 2), 3);
        assert_eq!(char_to_byte_index("héllo", 10), "héllo".len());
    }

    #[test]
    fn test_point_in_rect() {
        let rect = Rect::new(2, 2, 4, 3);
        assert!(point_in_rect(2, 2, rect));
        assert!(point_in_rect(5, 4, rect));
        assert!(!point_in_rect(6, 4, rect));
        assert!(!point_in_rect(1, 3, rect));
    }

    #[tokio::test]
    async fn test_typing_with_cursor_edits() {
        let (mut app, mut config) = test_app();
        app.screen = Screen::Chat;
        handle_key(&mut app, &mut config, press(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "Tinity".chars() {
            handle_key(&mut app, &mut config, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, &mut config, press(KeyCode::Home));
        handle_key(&mut app, &mut config, press(KeyCode::Right));
        handle_key(&mut app, &mut config, press(KeyCode::Char('r')));
        assert_eq!(app.input, "Trinity");

        handle_key(&mut app, &mut config, press(KeyCode::End));
        handle_key(&mut app, &mut config, press(KeyCode::Backspace));
        assert_eq!(app.input, "Trinit");
    }

    #[tokio::test]
    async fn test_number_key_fills_sample_question() {
        let (mut app, mut config) = test_app();
        app.screen = Screen::Chat;
        handle_key(&mut app, &mut config, press(KeyCode::Char('2')));
        assert_eq!(app.input, SAMPLE_QUESTIONS[1]);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_timeline_keys_move_selection() {
        let (mut app, mut config) = test_app();
        app.select_event(0);
        let start = app.window.selected();

        handle_key(&mut app, &mut config, press(KeyCode::Left));
        assert_eq!(app.window.selected(), start);
        handle_key(&mut app, &mut config, press(KeyCode::Right));
        assert_ne!(app.window.selected(), start);
        handle_key(&mut app, &mut config, press(KeyCode::Left));
        assert_eq!(app.window.selected(), start);

        handle_key(&mut app, &mut config, press(KeyCode::Char('G')));
        assert_eq!(app.window.sorted_position(app.window.selected()), Some(app.window.last_index()));
    }

    #[tokio::test]
    async fn test_resize_leaves_state_alone() {
        let (mut app, mut config) = test_app();
        app.select_event(3);
        handle_event(&mut app, &mut config, AppEvent::Resize).await.unwrap();
        assert_eq!(app.window.selected(), 3);
        assert_eq!(app.screen, Screen::Timeline);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_popup_swallows_keys() {
        let (mut app, mut config) = test_app();
        handle_key(&mut app, &mut config, press(KeyCode::Char('r')));
        assert!(app.show_level_picker);

        handle_key(&mut app, &mut config, press(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Timeline);

        handle_key(&mut app, &mut config, press(KeyCode::Char('j')));
        handle_key(&mut app, &mut config, press(KeyCode::Enter));
        assert!(!app.show_level_picker);
        assert_eq!(app.reading_level, fission_core::ReadingLevel::College);
    }
}
