//! Event system for notepad notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! The session never holds references to whoever renders it. It sends
//! events as values over a `tokio::sync::broadcast` channel and any number
//! of receivers pick them up:
//! - Events are values, not callbacks
//! - Subscribers receive clones
//! - Sending never blocks, even when a receiver falls behind

use std::path::PathBuf;
use tokio::sync::broadcast;

use crate::config::Theme;

/// Something the presenter may want to redraw for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotepadEvent {
    /// Buffer content changed
    ContentChanged,
    /// Selection or caret moved
    SelectionChanged,
    /// Highlight language switched, by id
    LanguageChanged(&'static str),
    /// A file was loaded into the session
    FileOpened(PathBuf),
    /// The buffer was written to disk
    FileSaved(PathBuf),
    /// Editor theme switched
    ThemeChanged(Theme),
    /// Sidebar shown or hidden
    SidebarToggled(bool),
}

/// Event bus for broadcasting notepad events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NotepadEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: NotepadEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<NotepadEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
