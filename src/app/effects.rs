use tracing::warn;

use crate::app::{Message, Model};

/// Run the file I/O behind `msg`, reporting the outcome on `model`.
pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
    match msg {
        Message::Save => save_document(model),
        Message::Reload => load_document(model),
        _ => {}
    }
}

/// Load `model.file_path`, leaving the document untouched on failure.
pub(super) fn load_document(model: &mut Model) {
    match model.reload_from_disk() {
        Ok(_) => {
            let path = model.file_path.display().to_string();
            model.status(format!("Editing {path}"));
        }
        Err(err) => {
            warn!(path = %model.file_path.display(), error = %err, "load failed");
            model.error(err.to_string());
        }
    }
}

fn save_document(model: &mut Model) {
    match model.save_to_disk() {
        Ok(bytes) => {
            let path = model.file_path.display().to_string();
            model.status(format!("{bytes} bytes saved to disk at {path}."));
        }
        Err(err) => {
            warn!(path = %model.file_path.display(), error = %err, "save failed");
            model.error(err.to_string());
        }
    }
}
