//! Copy-on-select clipboard bridge.
//!
//! When a selection gesture finishes, the selected text is handed to a
//! clipboard worker thread so the event loop never blocks. The worker owns
//! the clipboard handle for the whole session: on X11 the copied text is
//! served by whoever owns the selection, so the handle must outlive the
//! write. Requests are queued and written in order, each one completing on
//! its own. Completions are collected with [`ClipboardBridge::poll`]: each
//! successful write is reported exactly once, failures only reach the log.
//!
//! Uses `arboard` for cross-platform clipboard access.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::{debug, warn};

/// Something that can put plain text on a clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
///
/// The handle is opened on first use and kept afterwards. A failed write
/// drops it so the next one starts over with a fresh handle.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    /// Common failure cases: no display server (headless Linux), permission
    /// denied.
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().context("Failed to access clipboard")?,
        };
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        self.clipboard = Some(clipboard);
        Ok(())
    }
}

/// A successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copied {
    /// Identifier returned by [`ClipboardBridge::on_selection_finished`]
    pub request: u64,
    pub text: String,
}

struct Job {
    request: u64,
    text: String,
}

#[derive(Debug)]
enum Completion {
    Copied(Copied),
    Failed { request: u64, error: anyhow::Error },
}

/// Turns finished selections into clipboard writes.
pub struct ClipboardBridge {
    jobs: Sender<Job>,
    rx: Receiver<Completion>,
    next_request: u64,
    in_flight: usize,
}

impl ClipboardBridge {
    /// Starts the clipboard worker.
    ///
    /// The writer is built on the worker thread and lives there until the
    /// bridge is dropped and the queued requests are written.
    pub fn new<W, F>(make_writer: F) -> Result<Self>
    where
        W: ClipboardWriter + 'static,
        F: FnOnce() -> W + Send + 'static,
    {
        let (jobs, job_rx) = mpsc::channel::<Job>();
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("clipboard".to_string())
            .spawn(move || {
                let mut writer = make_writer();
                for Job { request, text } in job_rx {
                    let completion = match writer.write_text(&text) {
                        Ok(()) => Completion::Copied(Copied { request, text }),
                        Err(error) => Completion::Failed { request, error },
                    };
                    // The bridge may be gone already; late results are dropped.
                    let _ = tx.send(completion);
                }
                debug!("clipboard worker stopped");
            })
            .context("Failed to start clipboard worker")?;

        Ok(Self {
            jobs,
            rx,
            next_request: 1,
            in_flight: 0,
        })
    }

    /// A bridge writing to the system clipboard.
    pub fn system() -> Result<Self> {
        Self::new(SystemClipboard::default)
    }

    /// Number of writes requested but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Queues a clipboard write for a finished selection.
    ///
    /// Empty selections are ignored. Every non-empty call gets its own
    /// request and completion, even while earlier ones are still pending.
    /// Returns the request id.
    pub fn on_selection_finished(&mut self, text: &str) -> Option<u64> {
        if text.is_empty() {
            return None;
        }

        let request = self.next_request;
        self.next_request += 1;

        let job = Job {
            request,
            text: text.to_string(),
        };
        match self.jobs.send(job) {
            Ok(()) => {
                debug!(request, chars = text.chars().count(), "clipboard write requested");
                self.in_flight += 1;
                Some(request)
            }
            Err(_) => {
                warn!(request, "clipboard worker is gone, selection not copied");
                None
            }
        }
    }

    /// Collects finished writes without blocking.
    ///
    /// Calls `on_copied` once for every successful write and returns how many
    /// were reported.
    pub fn poll(&mut self, mut on_copied: impl FnMut(&Copied)) -> usize {
        let mut reported = 0;
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    if self.complete(completion, &mut on_copied) {
                        reported += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        reported
    }

    /// Waits up to `timeout` for all pending writes, reporting them like
    /// [`poll`](Self::poll).
    pub fn wait(&mut self, timeout: Duration, mut on_copied: impl FnMut(&Copied)) -> usize {
        let deadline = Instant::now() + timeout;
        let mut reported = 0;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if self.complete(completion, &mut on_copied) {
                        reported += 1;
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        reported
    }

    fn complete(&mut self, completion: Completion, on_copied: &mut impl FnMut(&Copied)) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Copied(copied) => {
                debug!(request = copied.request, "clipboard write succeeded");
                on_copied(&copied);
                true
            }
            Completion::Failed { request, error } => {
                warn!(request, error = %format!("{error:#}"), "clipboard write failed");
                false
            }
        }
    }
}
