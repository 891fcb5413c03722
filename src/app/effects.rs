use crate::app::{App, Message, Model};
use crate::app::model::StatusLevel;
use crate::file;

impl App {
    /// Apply the file-write side effects of a message after the pure
    /// update has run.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            // StartSave with a bound filename writes immediately;
            // ConfirmSave has just bound one in the update pass.
            Message::StartSave | Message::ConfirmSave => {
                if !model.readonly && model.save_prompt.is_none() {
                    save_document(model);
                }
            }
            _ => {}
        }
    }
}

fn save_document(model: &mut Model) {
    let Some(path) = model.file_path.clone() else {
        return;
    };
    match file::write_lines(&path, model.editor.document()) {
        Ok(written) => {
            model.editor.mark_saved();
            model.show_status(
                StatusLevel::Info,
                format!("{} lines written to {}", written, path.display()),
            );
            tracing::debug!(path = %path.display(), lines = written, "saved");
        }
        Err(err) => {
            model.show_status(StatusLevel::Error, format!("Save failed: {err}"));
            tracing::warn!(path = %path.display(), error = %err, "save failed");
        }
    }
}
