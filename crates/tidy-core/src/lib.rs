//! # Tidy Core
//!
//! Application state for the launcher and the notepad.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Notepad                         │
//! │  ┌────────────┐ ┌────────────┐ ┌──────────────────┐  │
//! │  │ TextBuffer │ │ Selection  │ │ LanguageInfo     │  │
//! │  └────────────┘ └────────────┘ └──────────────────┘  │
//! │        │ FileSystem / Dialogs        │ EventBus      │
//! └────────┼─────────────────────────────┼───────────────┘
//!          │                             │
//!   ┌──────┴──────┐               ┌──────┴──────┐
//!   │   Sidebar   │               │  presenter  │
//!   └─────────────┘               └─────────────┘
//! ```
//!
//! The launcher palette and [`Config`] sit beside the notepad and share
//! nothing with it but the config file.

pub mod config;
pub mod event;
pub mod fs;
pub mod launcher;
pub mod notepad;
pub mod sidebar;

pub use config::{Config, ConfigError, Theme};
pub use event::{EventBus, NotepadEvent};
pub use fs::{Dialogs, FileEntry, FileSystem, LocalFileSystem};
pub use launcher::{Launcher, LauncherEntry, WindowAction};
pub use notepad::{KeyResponse, Notepad, Status};
pub use sidebar::{Sidebar, SidebarRow, TreeNode};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] tidy_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
