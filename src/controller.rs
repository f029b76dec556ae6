//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup (raw mode, mouse capture)
//! - Layout measurement on start and on every resize
//! - Event polling and handling
//! - Collecting clipboard completions
//! - Rendering
//!
//! Within one pass the order is fixed: measure, re-partition, draw.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, info};

use crate::clipboard::ClipboardBridge;
use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::layout::LayoutObserver;
use crate::model::AppState;
use crate::ui::{alignment_panel, render};

/// How long quitting waits for pending clipboard writes.
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Row capacity tracking
    layout: LayoutObserver,
    /// Copy-on-select
    clipboard: ClipboardBridge,
    /// Where the grid is currently drawn
    panel: Rect,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, clipboard: ClipboardBridge) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            state,
            layout: LayoutObserver::default(),
            clipboard,
            panel: Rect::default(),
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // First measurement once the surface exists
        self.update_layout()?;

        loop {
            let state = &mut self.state;
            self.clipboard.poll(|copied| {
                info!(request = copied.request, "selection copied to clipboard");
                state.notify_copied(Instant::now());
            });

            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event);

                // Handle resize specially to update the layout
                if let Action::Resize(width, height) = action {
                    debug!(width, height, "terminal resized");
                    self.update_layout()?;
                }

                if let Some(text) = apply_action(&mut self.state, action, self.panel) {
                    self.clipboard.on_selection_finished(&text);
                }

                if self.state.should_quit {
                    // Let a copy made just before quitting land
                    self.clipboard.wait(QUIT_GRACE, |copied| {
                        info!(request = copied.request, "selection copied to clipboard");
                    });
                    break;
                }
            }
        }

        Ok(())
    }

    /// Measures the alignment panel and re-lays out rows if its width
    /// changed.
    fn update_layout(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.panel = alignment_panel(Rect::new(0, 0, size.width, size.height));

        if let Some(capacity) = self.layout.observe(self.panel.width) {
            self.state.apply_capacity(capacity);
        }
        self.state.set_panel_height(usize::from(self.panel.height));
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the viewer on the system clipboard.
pub fn run_app(state: AppState) -> Result<()> {
    let mut app = App::new(state, ClipboardBridge::system()?)?;
    app.run()
}
