use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::editor::EditorBuffer;
use crate::search::SearchState;

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The C-style
/// process-wide editor singleton this replaces is now an owned value
/// threaded through the dispatch loop.
pub struct Model {
    /// The editing session: document, cursor, and viewport
    pub editor: EditorBuffer,
    /// Path the buffer is bound to (`None` until save-as binds one)
    pub file_path: Option<PathBuf>,
    /// Active search session (`None` means search mode is idle)
    pub search: Option<SearchState>,
    /// Filename being typed into the save-as prompt
    pub save_prompt: Option<String>,
    /// Whether edits are rejected
    pub readonly: bool,
    /// Set after a first quit attempt with unsaved changes; a second
    /// consecutive quit proceeds
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    status: Option<StatusMessage>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("editor", &self.editor)
            .field("readonly", &self.readonly)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for a loaded document and terminal size.
    pub fn new(
        file_path: Option<PathBuf>,
        document: Document,
        terminal_size: (u16, u16),
    ) -> Self {
        Self {
            editor: EditorBuffer::new(
                document,
                terminal_size.0,
                terminal_size.1.saturating_sub(crate::ui::RESERVED_ROWS),
            ),
            file_path,
            search: None,
            save_prompt: None,
            readonly: false,
            quit_confirmed: false,
            should_quit: false,
            status: None,
        }
    }

    /// The name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.file_path.as_ref().map_or_else(
            || "[No Name]".to_string(),
            |path| path.display().to_string(),
        )
    }

    /// Whether a prompt (search or save-as) currently owns keyboard input.
    pub const fn prompt_active(&self) -> bool {
        self.search.is_some() || self.save_prompt.is_some()
    }

    pub fn show_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    /// Drop the status message once its time is up; returns whether a
    /// redraw is needed.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
            return true;
        }
        false
    }

    pub fn active_status(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(None, Document::new(), (80, 24))
    }
}
