use crate::app::Model;
use crate::app::model::StatusLevel;
use crate::editor::Direction;
use crate::search::{SearchDirection, SearchState};

/// All possible events and actions in the application.
///
/// These are the logical commands the input decoder produces; the update
/// function is a pure transition over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Cursor
    /// Move the cursor (arrows, Home/End, PageUp/PageDown)
    Move(Direction),

    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the active line at the cursor (Enter)
    InsertNewline,
    /// Delete the byte before the cursor (Backspace)
    DeleteChar,

    // File
    /// Save the buffer, prompting for a filename when none is bound
    StartSave,
    /// Update the save-as prompt contents
    SaveInput(String),
    /// Bind the typed filename and save
    ConfirmSave,
    /// Abandon the save-as prompt
    CancelSave,

    // Search
    /// Enter search mode, snapshotting cursor and scroll
    StartFind,
    /// Update the search query (incremental)
    SearchInput(String),
    /// Jump to the next match in a direction, wrapping cyclically
    SearchNext(SearchDirection),
    /// Leave search mode, keeping the cursor at the match
    ConfirmSearch,
    /// Leave search mode, restoring the pre-search cursor and scroll
    CancelSearch,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application (repeated to confirm when dirty)
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. The only
/// side effects (file writes) run afterwards in the effects pass.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A quit confirmation only survives into an immediately repeated quit.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Cursor
        Message::Move(direction) => {
            model.editor.move_cursor(direction);
        }

        // Editing
        Message::InsertChar(ch) => {
            if !reject_readonly(&mut model) {
                model.editor.insert_char(ch);
            }
        }
        Message::InsertNewline => {
            if !reject_readonly(&mut model) {
                model.editor.insert_newline();
            }
        }
        Message::DeleteChar => {
            if !reject_readonly(&mut model) {
                model.editor.delete_char();
            }
        }

        // File. The write itself happens in the effects pass; here we only
        // decide whether a filename must be prompted for first.
        Message::StartSave => {
            if !reject_readonly(&mut model) && model.file_path.is_none() {
                model.save_prompt = Some(String::new());
            }
        }
        Message::SaveInput(name) => {
            if model.save_prompt.is_some() {
                model.save_prompt = Some(name);
            }
        }
        Message::ConfirmSave => {
            if let Some(name) = model.save_prompt.take() {
                if name.is_empty() {
                    model.show_status(StatusLevel::Warning, "Save aborted");
                } else {
                    model.file_path = Some(name.into());
                }
            }
        }
        Message::CancelSave => {
            if model.save_prompt.take().is_some() {
                model.show_status(StatusLevel::Info, "Save aborted");
            }
        }

        // Search
        Message::StartFind => {
            model.search = Some(SearchState::new(
                model.editor.cursor(),
                model.editor.viewport().offset(),
            ));
        }
        Message::SearchInput(query) => {
            if let Some(search) = &mut model.search {
                search.set_query(query);
                match search.find_first(model.editor.document()) {
                    Some(found) => model.editor.move_to(found.row, found.col),
                    // Miss: cursor stays put, search stays active.
                    None => {
                        if !search.query().is_empty() {
                            let text =
                                format!("No match found for '{}'", search.query());
                            model.show_status(StatusLevel::Info, text);
                        }
                    }
                }
            }
        }
        Message::SearchNext(direction) => {
            if let Some(search) = &mut model.search
                && !search.query().is_empty()
            {
                match search.find_next(model.editor.document(), direction) {
                    Some(found) => model.editor.move_to(found.row, found.col),
                    None => model.show_status(StatusLevel::Info, "No more matches"),
                }
            }
        }
        Message::ConfirmSearch => {
            // Cursor stays at the highlighted match.
            model.search = None;
        }
        Message::CancelSearch => {
            if let Some(search) = model.search.take() {
                model
                    .editor
                    .restore(search.saved_cursor(), search.saved_offset());
            }
        }

        // Window
        Message::Resize(width, height) => {
            model
                .editor
                .resize(width, height.saturating_sub(crate::ui::RESERVED_ROWS));
        }

        // Application
        Message::Quit => {
            if model.editor.is_dirty() && !model.quit_confirmed {
                model.show_status(
                    StatusLevel::Warning,
                    "Unsaved changes! Press Ctrl-Q again to quit, or Ctrl-S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn reject_readonly(model: &mut Model) -> bool {
    if model.readonly {
        model.show_status(StatusLevel::Warning, "Buffer is read-only");
    }
    model.readonly
}
