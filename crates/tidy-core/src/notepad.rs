//! The notepad editing session.
//!
//! ## Learning: Composition over Inheritance
//!
//! `Notepad` composes a [`TextBuffer`] and a [`Selection`] with the file and
//! view state around them. It never performs I/O itself: file access and
//! pickers come in through the [`FileSystem`] and [`Dialogs`] traits, and
//! every visible change goes out as a [`NotepadEvent`].
//!
//! ## Failure Model
//!
//! A failed read or write returns a [`CoreError`] and leaves the session
//! exactly as it was. A cancelled dialog is not a failure; it returns
//! `Ok(false)`.

use std::path::Path;
use tokio::sync::broadcast;

use tidy_buffer::{transform, KeyOutcome, KeyPress, Selection, TextBuffer};
use tidy_syntax::LanguageInfo;

use crate::config::{NotepadConfig, Theme};
use crate::event::{EventBus, NotepadEvent};
use crate::fs::{Dialogs, FileSystem};
use crate::CoreResult;

/// Name shown for a buffer that has never been saved.
pub const UNTITLED: &str = "Untitled";

/// Whether the session consumed a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Handled,
    /// The caller should insert the key's text with [`Notepad::insert_text`].
    Declined,
}

/// Numbers for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub chars: usize,
    pub lines: usize,
    pub language: &'static LanguageInfo,
}

/// A single-document editing session.
#[derive(Debug)]
pub struct Notepad {
    buffer: TextBuffer,
    selection: Selection,
    file_name: String,
    language: &'static LanguageInfo,
    theme: Theme,
    sidebar_visible: bool,
    auto_detect_min_chars: usize,
    events: EventBus,
}

impl Notepad {
    /// Creates an empty untitled session with default settings.
    pub fn new() -> Self {
        Self::with_config(&NotepadConfig::default())
    }

    /// Creates an empty untitled session.
    pub fn with_config(config: &NotepadConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            selection: Selection::default(),
            file_name: UNTITLED.to_string(),
            language: tidy_syntax::plain_text(),
            theme: config.theme,
            sidebar_visible: config.sidebar_visible,
            auto_detect_min_chars: config.auto_detect_min_chars,
            events: EventBus::new(),
        }
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<NotepadEvent> {
        self.events.subscribe()
    }

    // ==================== File Operations ====================

    /// Starts a new untitled document.
    ///
    /// With unsaved changes, `confirm` decides whether to discard them.
    /// Returns false if the user kept the current document.
    pub fn new_document(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if self.buffer.is_modified() && !confirm() {
            return false;
        }

        self.buffer = TextBuffer::new();
        self.selection = Selection::default();
        self.file_name = UNTITLED.to_string();
        self.events.emit(NotepadEvent::ContentChanged);
        self.switch_language(tidy_syntax::plain_text());
        true
    }

    /// Asks for a file and loads it. Returns false if cancelled.
    pub fn open(&mut self, fs: &dyn FileSystem, dialogs: &mut dyn Dialogs) -> CoreResult<bool> {
        let Some(path) = dialogs.pick_file_to_open() else {
            return Ok(false);
        };
        self.load(fs, &path)?;
        Ok(true)
    }

    /// Loads `path`, typically picked in the sidebar.
    ///
    /// With unsaved changes, `confirm` decides whether to discard them.
    pub fn open_path(
        &mut self,
        fs: &dyn FileSystem,
        path: &Path,
        confirm: impl FnOnce() -> bool,
    ) -> CoreResult<bool> {
        if self.buffer.is_modified() && !confirm() {
            return Ok(false);
        }
        self.load(fs, path)?;
        Ok(true)
    }

    fn load(&mut self, fs: &dyn FileSystem, path: &Path) -> CoreResult<()> {
        let content = fs.read_file(path)?;
        let name = display_name(path);
        let language = tidy_syntax::classify(&name, &content);

        tracing::info!(path = %path.display(), language = language.id, "opened file");

        self.buffer = TextBuffer::with_path(&content, path);
        self.selection = Selection::default();
        self.file_name = name;
        self.events.emit(NotepadEvent::FileOpened(path.to_path_buf()));
        self.events.emit(NotepadEvent::ContentChanged);
        self.switch_language(language);
        Ok(())
    }

    /// Writes the buffer to its file, asking for a location the first time.
    ///
    /// Returns false if the save dialog was cancelled.
    pub fn save(&mut self, fs: &dyn FileSystem, dialogs: &mut dyn Dialogs) -> CoreResult<bool> {
        let path = match self.buffer.file_path() {
            Some(path) => path.to_path_buf(),
            None => match dialogs.pick_save_location() {
                Some(path) => path,
                None => return Ok(false),
            },
        };

        fs.write_file(&path, &self.buffer.text())?;
        tracing::info!(path = %path.display(), "saved file");

        self.file_name = display_name(&path);
        self.buffer.mark_saved(&path);
        self.events.emit(NotepadEvent::FileSaved(path));
        Ok(true)
    }

    // ==================== Editing ====================

    /// Replaces the whole content, as when the editor reports new text.
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.selection = self.selection.clamp(self.buffer.len_chars());
        self.content_changed();
    }

    /// Runs a key press through the transform engine.
    pub fn handle_key(&mut self, key: &KeyPress) -> CoreResult<KeyResponse> {
        let outcome = transform::apply_key(&self.buffer.text(), self.selection, key);

        let KeyOutcome::Handled { edit, selection } = outcome else {
            tracing::debug!(%key, "key declined");
            return Ok(KeyResponse::Declined);
        };

        tracing::debug!(%key, %selection, "key handled");
        if !edit.is_noop() {
            self.buffer.apply_edit(&edit)?;
            self.content_changed();
        }
        self.set_selection(selection)?;
        Ok(KeyResponse::Handled)
    }

    /// Replaces the selection with `text` and puts the caret after it.
    pub fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        let caret = self.buffer.insert_over(self.selection, text)?;
        self.content_changed();
        self.set_selection(caret)
    }

    /// Moves the selection.
    pub fn set_selection(&mut self, selection: Selection) -> CoreResult<()> {
        // Validates against the current length
        self.buffer.selected(selection)?;
        if selection != self.selection {
            self.selection = selection;
            self.events.emit(NotepadEvent::SelectionChanged);
        }
        Ok(())
    }

    fn content_changed(&mut self) {
        self.events.emit(NotepadEvent::ContentChanged);

        if self.file_name != UNTITLED {
            return;
        }

        let text = self.buffer.text();
        if text.trim().chars().count() > self.auto_detect_min_chars {
            let detected = tidy_syntax::classify(&self.file_name, &text);
            drop(text);
            self.switch_language(detected);
        }
    }

    // ==================== View State ====================

    /// Picks the highlight language by id. Unknown ids are ignored.
    pub fn set_language(&mut self, id: &str) -> bool {
        match tidy_syntax::find_language(id) {
            Ok(language) => {
                self.switch_language(language);
                true
            }
            Err(err) => {
                tracing::debug!("{}", err);
                false
            }
        }
    }

    fn switch_language(&mut self, language: &'static LanguageInfo) {
        if language.id != self.language.id {
            self.language = language;
            self.events.emit(NotepadEvent::LanguageChanged(language.id));
        }
    }

    /// Switches between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.events.emit(NotepadEvent::ThemeChanged(self.theme));
        self.theme
    }

    /// Shows or hides the file tree.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        self.events
            .emit(NotepadEvent::SidebarToggled(self.sidebar_visible));
        self.sidebar_visible
    }

    // ==================== Queries ====================

    pub fn text(&self) -> String {
        self.buffer.text().into_owned()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.buffer.file_path()
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub fn language(&self) -> &'static LanguageInfo {
        self.language
    }

    /// Returns true when the editor should run the highlighter.
    pub fn should_highlight(&self) -> bool {
        tidy_syntax::should_highlight(self.language, &self.buffer.text())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    /// Returns the status bar numbers.
    pub fn status(&self) -> Status {
        Status {
            chars: self.buffer.len_chars(),
            lines: self.buffer.len_lines(),
            language: self.language,
        }
    }

    /// Returns the file name, with ` *` appended when there are unsaved changes.
    pub fn title(&self) -> String {
        if self.buffer.is_modified() {
            format!("{} *", self.file_name)
        } else {
            self.file_name.clone()
        }
    }
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}
