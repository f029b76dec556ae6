//! Keyboard and mouse event handling.
//!
//! - Left-drag over the alignment selects residues; releasing the button
//!   copies the selection to the clipboard
//! - `Esc`: clear the selection
//! - `j`/`k`, arrows, mouse wheel: scroll one line
//! - `PageUp`/`PageDown`: scroll one page
//! - `g`/`G`, `Home`/`End`: jump to top or bottom
//! - `q` or `Ctrl+C`: quit

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Duration;

use crate::model::AppState;
use crate::selection::{clamped_grid_pos, grid_pos_at};

/// Lines scrolled per mouse wheel notch.
const WHEEL_STEP: usize = 3;

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (input not recognized)
    None,
    /// Quit the application
    Quit,
    /// Scroll up by a number of lines
    ScrollUp(usize),
    /// Scroll down by a number of lines
    ScrollDown(usize),
    /// Scroll a full page up
    PageUp,
    /// Scroll a full page down
    PageDown,
    /// Jump to the first row
    ScrollTop,
    /// Jump to the last row
    ScrollBottom,
    /// Drop the current selection
    ClearSelection,
    /// Left button pressed at a screen cell (column, row)
    SelectStart(u16, u16),
    /// Pointer dragged to a screen cell
    SelectExtend(u16, u16),
    /// Left button released at a screen cell: the selection is finished
    SelectFinish(u16, u16),
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action.
pub fn handle_event(event: Event) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event),
        Event::Mouse(mouse_event) => handle_mouse_event(mouse_event),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key press.
fn handle_key_event(key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::ClearSelection,

        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp(1),
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown(1),
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Char('g') | KeyCode::Home => Action::ScrollTop,
        KeyCode::Char('G') | KeyCode::End => Action::ScrollBottom,

        _ => Action::None,
    }
}

/// Handles mouse buttons, drags and the wheel.
fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::SelectStart(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::SelectExtend(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::SelectFinish(mouse.column, mouse.row),
        MouseEventKind::ScrollUp => Action::ScrollUp(WHEEL_STEP),
        MouseEventKind::ScrollDown => Action::ScrollDown(WHEEL_STEP),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// `panel` is the screen area the grid is drawn in, used to map mouse
/// positions to residues. Returns the selected text when a selection
/// gesture finished, ready to be copied.
pub fn apply_action(state: &mut AppState, action: Action, panel: Rect) -> Option<String> {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ScrollUp(lines) => {
            state.scroll_up(lines);
        }
        Action::ScrollDown(lines) => {
            state.scroll_down(lines);
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::ScrollTop => {
            state.scroll_to_top();
        }
        Action::ScrollBottom => {
            state.scroll_to_bottom();
        }
        Action::ClearSelection => {
            state.clear_selection();
        }
        Action::SelectStart(column, row) => match grid_pos_at(panel, state.scroll, column, row) {
            Some(pos) => state.begin_selection(pos),
            None => state.clear_selection(),
        },
        Action::SelectExtend(column, row) => {
            if let Some(pos) = clamped_grid_pos(panel, state.scroll, column, row) {
                state.extend_selection(pos);
            }
        }
        Action::SelectFinish(column, row) => {
            let pos = clamped_grid_pos(panel, state.scroll, column, row)?;
            return state.finish_selection(pos);
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    None
}
