//! Copy-to-clipboard action and its transient acknowledgment
//!
//! Copying goes through the [`ClipboardProvider`] trait so the view can be
//! driven with an in-memory clipboard in tests. The real provider,
//! [`SystemClipboard`], uses the native clipboard and falls back to an
//! OSC 52 escape sequence (handled by the terminal emulator) when no native
//! clipboard is reachable, e.g. over SSH.

use std::{
    cell::RefCell,
    collections::HashMap,
    io::{self, Write},
    rc::Rc,
    time::{Duration, Instant},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ClipboardError;

/// Largest payload sent through OSC 52; many terminals drop longer ones
pub const OSC52_MAX_BYTES: usize = 100_000;

/// Something that can place text on the host clipboard
pub trait ClipboardProvider {
    /// Copy text to the clipboard
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "clipboard"
    }
}

/// Native clipboard with an OSC 52 fallback
pub struct SystemClipboard {
    native: Option<arboard::Clipboard>,
    osc52: Osc52Clipboard<io::Stdout>,
}

impl SystemClipboard {
    /// Connect to the native clipboard, keeping OSC 52 as a fallback
    pub fn new() -> Self {
        let native = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::info!("Native clipboard unavailable, using OSC 52: {}", e);
                None
            }
        };

        Self {
            native,
            osc52: Osc52Clipboard::new(io::stdout(), Osc52Clipboard::<io::Stdout>::in_tmux()),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let native_error = match self.native.as_mut() {
            Some(clipboard) => match clipboard.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(e) => Some(map_arboard_error(e)),
            },
            None => None,
        };

        if let Some(e) = native_error {
            tracing::debug!("Native clipboard failed ({}), trying OSC 52", e);
        }
        self.osc52.set_text(text)
    }

    fn name(&self) -> &'static str {
        if self.native.is_some() {
            "native"
        } else {
            "osc52"
        }
    }
}

fn map_arboard_error(error: arboard::Error) -> ClipboardError {
    match error {
        arboard::Error::ClipboardNotSupported => ClipboardError::NotAvailable,
        other => ClipboardError::OperationFailed {
            message: other.to_string(),
        },
    }
}

/// Clipboard writes through the OSC 52 terminal escape sequence
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    tmux: bool,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W, tmux: bool) -> Self {
        Self { writer, tmux }
    }

    /// Whether we are running inside tmux
    pub fn in_tmux() -> bool {
        std::env::var_os("TMUX").is_some()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardProvider for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text, self.tmux)?;
        self.writer
            .write_all(sequence.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| ClipboardError::OperationFailed {
                message: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "osc52"
    }
}

/// Build the OSC 52 "set clipboard" sequence, wrapped for tmux if needed
pub fn osc52_sequence(text: &str, tmux: bool) -> Result<String, ClipboardError> {
    if text.len() > OSC52_MAX_BYTES {
        return Err(ClipboardError::ContentTooLarge { size: text.len() });
    }

    let sequence = format!("\x1b]52;c;{}\x07", STANDARD.encode(text));
    if tmux {
        Ok(format!(
            "\x1bPtmux;{}\x1b\\",
            sequence.replace('\x1b', "\x1b\x1b")
        ))
    } else {
        Ok(sequence)
    }
}

/// In-memory clipboard, for headless runs and tests
///
/// Clones share the same history, so a test can keep one handle and give
/// the other to the view.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    history: Rc<RefCell<Vec<String>>>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write
    pub fn failing() -> Self {
        Self {
            history: Rc::default(),
            failing: true,
        }
    }

    pub fn last(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.failing {
            return Err(ClipboardError::NotAvailable);
        }
        self.history.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Tracks the transient "copied" acknowledgment of each card
///
/// Every successful copy sets a deadline for that card only. Copying the
/// same card again moves its deadline forward, so the marker never reverts
/// in between. Deadlines are only ever cleared by [`CopyTracker::expire`].
#[derive(Debug, Clone)]
pub struct CopyTracker {
    duration: Duration,
    deadlines: HashMap<String, Instant>,
}

impl CopyTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadlines: HashMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Copy `code` for card `id`, acknowledging on success
    ///
    /// Failures are logged and leave no acknowledgment; they never propagate.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn ClipboardProvider,
        id: &str,
        code: &str,
        now: Instant,
    ) -> bool {
        match clipboard.set_text(code) {
            Ok(()) => {
                tracing::debug!(id, via = clipboard.name(), bytes = code.len(), "Copied snippet");
                self.acknowledge(id, now);
                true
            }
            Err(e) => {
                tracing::warn!(id, via = clipboard.name(), "Failed to copy snippet: {}", e);
                false
            }
        }
    }

    /// Record a successful copy at `now`
    pub fn acknowledge(&mut self, id: &str, now: Instant) {
        self.deadlines.insert(id.to_string(), now + self.duration);
    }

    pub fn is_acknowledged(&self, id: &str, now: Instant) -> bool {
        self.deadlines
            .get(id)
            .is_some_and(|deadline| now < *deadline)
    }

    /// Drop acknowledgments whose deadline has passed; returns how many
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.deadlines.len();
        self.deadlines.retain(|_, deadline| now < *deadline);
        before - self.deadlines.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.deadlines.is_empty()
    }
}
