use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::ForceQuit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Action::NextPage,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Action::PrevPage,
        KeyCode::Char('g') | KeyCode::Home => Action::FirstPage,
        KeyCode::Char('G') | KeyCode::End => Action::LastPage,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('[') => Action::OlderYear,
        KeyCode::Char(']') => Action::NewerYear,
        KeyCode::Char('x') => Action::ClearYear,
        KeyCode::Tab => Action::ToggleCartFocus,
        KeyCode::Char('c') => Action::ClearSelection,
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveFromCart,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCancel,
        KeyCode::Enter => Action::SearchConfirm,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchInput(c),
        _ => Action::None,
    }
}
