//! Hooksheet terminal user interface
//!
//! An interactive cheat sheet built on ratatui and crossterm:
//! - [`sheet::CheatSheet`]: query, selection, expansion and copy handling
//! - [`view`]: rendering of the search box, cards and footer
//! - [`clipboard`]: clipboard providers and the transient "copied" marker
//! - [`app::App`]: the event loop tying input, ticks and redraws together
//! - [`cli`]: the `hooksheet` command line, including the `--print` mode

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod event;
pub mod logging;
pub mod sheet;
pub mod state;
pub mod terminal;
pub mod view;

pub use app::App;
pub use clipboard::{ClipboardProvider, CopyTracker, MemoryClipboard, Osc52Clipboard, SystemClipboard};
pub use error::{ClipboardError, TuiError, TuiResult};
pub use event::{Event, EventLoop};
pub use sheet::{CheatSheet, HitRegion, HitTarget, DEFAULT_COPY_ACK};
pub use state::{ExpansionTracker, UiState};
pub use terminal::TerminalState;
