//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputMode, PopupState, Route};
use crate::view::sections::PanelBody;

/// Lines moved by PageUp / PageDown in scrollable views.
const SCROLL_PAGE: usize = 20;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Unmount the current view and mount `Route`.
    Navigate(Route),
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;

    match state.popup {
        PopupState::QuitConfirm => return handle_quit_confirm(state, key),
        PopupState::Help { .. } => return handle_help(state, key),
        PopupState::None => {}
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    let PopupState::Help { scroll } = state.popup else {
        return KeyAction::None;
    };
    state.popup = match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => PopupState::None,
        KeyCode::Up | KeyCode::Char('k') => PopupState::Help {
            scroll: scroll.saturating_sub(1),
        },
        KeyCode::Down | KeyCode::Char('j') => PopupState::Help {
            scroll: scroll.saturating_add(1),
        },
        KeyCode::PageUp => PopupState::Help {
            scroll: scroll.saturating_sub(SCROLL_PAGE),
        },
        KeyCode::PageDown => PopupState::Help {
            scroll: scroll.saturating_add(SCROLL_PAGE),
        },
        _ => return KeyAction::None,
    };
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char('?') | KeyCode::F(1) => {
            state.popup = PopupState::Help { scroll: 0 };
            KeyAction::None
        }

        // Routes
        KeyCode::Char('1') => navigate(state, Route::App),
        KeyCode::Char('2') => navigate(state, Route::Dashboard),

        // Panel focus (App view)
        KeyCode::Tab => {
            if let Some(view) = state.view.as_mut() {
                view.focus_next();
            }
            KeyAction::None
        }
        KeyCode::BackTab => {
            if let Some(view) = state.view.as_mut() {
                view.focus_prev();
            }
            KeyAction::None
        }

        // Pagination of the focused table
        KeyCode::Right | KeyCode::Char('n') => {
            if let Some(table) = state.view.as_mut().and_then(|v| v.focused_table_mut()) {
                table.next_page();
            }
            KeyAction::None
        }
        KeyCode::Left | KeyCode::Char('p') => {
            if let Some(table) = state.view.as_mut().and_then(|v| v.focused_table_mut()) {
                table.previous_page();
            }
            KeyAction::None
        }

        // Search
        KeyCode::Char('/') => {
            let has_table = state
                .view
                .as_mut()
                .and_then(|v| v.focused_table_mut())
                .is_some();
            if has_table {
                state.input_mode = InputMode::Filter;
            } else {
                state.status_message = Some("No table to search".to_string());
            }
            KeyAction::None
        }

        // Scrolling (Dashboard dump, slide list)
        KeyCode::Up | KeyCode::Char('k') => scroll_by(state, |s, _| s.saturating_sub(1)),
        KeyCode::Down | KeyCode::Char('j') => scroll_by(state, |s, _| s.saturating_add(1)),
        KeyCode::PageUp => scroll_by(state, |s, _| s.saturating_sub(SCROLL_PAGE)),
        KeyCode::PageDown => scroll_by(state, |s, _| s.saturating_add(SCROLL_PAGE)),
        KeyCode::Home => scroll_by(state, |_, _| 0),
        KeyCode::End => scroll_by(state, |_, max| max),

        _ => KeyAction::None,
    }
}

/// Handles keys while editing the focused table's filter. Every keystroke
/// applies immediately; Enter keeps the filter, Esc clears it.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    let Some(table) = state.view.as_mut().and_then(|v| v.focused_table_mut()) else {
        state.input_mode = InputMode::Normal;
        return KeyAction::None;
    };

    match key.code {
        KeyCode::Enter => state.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            table.set_filter("");
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => table.pop_filter_char(),
        KeyCode::Char(c) => table.push_filter_char(c),
        _ => {}
    }
    KeyAction::None
}

fn navigate(state: &mut AppState, route: Route) -> KeyAction {
    if state.current_route() == Some(route) {
        return KeyAction::None;
    }
    KeyAction::Navigate(route)
}

/// Updates the scroll offset of the scrollable content, clamped to its
/// length. `f` receives the current offset and the maximum.
fn scroll_by(state: &mut AppState, f: impl Fn(usize, usize) -> usize) -> KeyAction {
    let Some(view) = state.view.as_mut() else {
        return KeyAction::None;
    };
    let len = match view.route {
        Route::Dashboard => view.dump.len(),
        Route::App => match view.focused_panel().map(|p| &p.body) {
            Some(PanelBody::Slides(lines)) => lines.len(),
            _ => 0,
        },
    };
    let max = len.saturating_sub(1);
    view.scroll = f(view.scroll, max).min(max);
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use crate::view::table::ColumnPolicy;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// App view loaded with 25 employees (panel 1) and a slide list (panel 5).
    fn loaded_app() -> AppState {
        let employees: Vec<serde_json::Value> = (0..25)
            .map(|i| json!({"name": format!("emp-{i}"), "id": i}))
            .collect();
        let slides: Vec<serde_json::Value> = (1..=30)
            .map(|i| json!({"Slide": i, "Content": format!("text {i}")}))
            .collect();
        let payload = Payload::from_value(json!({
            "json_employee_data": employees,
            "cleaned_pptx": {"pptx_text": slides}
        }));

        let mut state = AppState::new(ColumnPolicy::FirstRecord, "test");
        let token = state.mount(Route::App);
        state.apply_fetch(token.id(), Some(payload));
        state
    }

    fn focus_employees(state: &mut AppState) {
        let _ = handle_key(state, key(KeyCode::Tab));
        assert_eq!(
            state.view.as_ref().unwrap().focused_panel().unwrap().heading(),
            "Employee Data"
        );
    }

    fn page_index(state: &mut AppState) -> usize {
        state
            .view
            .as_mut()
            .unwrap()
            .focused_table_mut()
            .unwrap()
            .page_index()
    }

    #[test]
    fn number_keys_navigate_between_routes() {
        let mut state = loaded_app();
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('2'))),
            KeyAction::Navigate(Route::Dashboard)
        );
        // Already on `/`: no remount.
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('1'))), KeyAction::None);
    }

    #[test]
    fn arrows_page_through_focused_table() {
        let mut state = loaded_app();
        focus_employees(&mut state);

        let _ = handle_key(&mut state, key(KeyCode::Right));
        let _ = handle_key(&mut state, key(KeyCode::Char('n')));
        assert_eq!(page_index(&mut state), 2);

        // Next is disabled on the last page.
        let _ = handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(page_index(&mut state), 2);

        let _ = handle_key(&mut state, key(KeyCode::Left));
        let _ = handle_key(&mut state, key(KeyCode::Char('p')));
        let _ = handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(page_index(&mut state), 0);
    }

    #[test]
    fn filter_mode_edits_focused_table_live() {
        let mut state = loaded_app();
        focus_employees(&mut state);
        let _ = handle_key(&mut state, key(KeyCode::Right));

        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Filter);

        for c in "EMP-1".chars() {
            let _ = handle_key(&mut state, key(KeyCode::Char(c)));
        }
        assert_eq!(state.current_filter(), Some("EMP-1"));
        assert_eq!(page_index(&mut state), 0);
        {
            let table = state.view.as_mut().unwrap().focused_table_mut().unwrap();
            // emp-1, emp-10..emp-19
            assert_eq!(table.filtered_len(), 11);
        }

        let _ = handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.current_filter(), Some("EMP-"));

        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.current_filter(), Some("EMP-"));
    }

    #[test]
    fn esc_in_filter_mode_clears_filter() {
        let mut state = loaded_app();
        focus_employees(&mut state);

        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        let _ = handle_key(&mut state, key(KeyCode::Char('x')));
        let _ = handle_key(&mut state, key(KeyCode::Esc));

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.current_filter(), None);
    }

    #[test]
    fn filter_unavailable_on_placeholder_panel() {
        let mut state = loaded_app();
        // Panel 0 is the company placeholder.
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut state = AppState::new(ColumnPolicy::FirstRecord, "test");
        state.mount(Route::App);

        assert_eq!(handle_key(&mut state, key(KeyCode::Tab)), KeyAction::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Right)), KeyAction::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Down)), KeyAction::None);
        assert!(state.view.as_ref().unwrap().is_loading());
    }

    #[test]
    fn slide_list_scrolls_within_bounds() {
        let mut state = loaded_app();
        let _ = handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(
            state.view.as_ref().unwrap().focused_panel().unwrap().heading(),
            "PPTX Slide Text"
        );

        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.view.as_ref().unwrap().scroll, 1);
        let _ = handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.view.as_ref().unwrap().scroll, 29);
        let _ = handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.view.as_ref().unwrap().scroll, 29);
        let _ = handle_key(&mut state, key(KeyCode::Home));
        assert_eq!(state.view.as_ref().unwrap().scroll, 0);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = loaded_app();

        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(state.popup, PopupState::QuitConfirm);

        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::None);
        assert_eq!(state.popup, PopupState::None);

        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = loaded_app();
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);

        focus_employees(&mut state);
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn help_popup_opens_scrolls_and_closes() {
        let mut state = loaded_app();
        let _ = handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.popup, PopupState::Help { scroll: 0 });

        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.popup, PopupState::Help { scroll: 1 });

        // Route keys do nothing while help is open.
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('2'))), KeyAction::None);

        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.popup, PopupState::None);
    }
}
