use std::path::Path;

use crate::app::{App, Message, Model, ToastLevel};

/// Name of the export target in the working directory.
pub const EXPORT_FILE_NAME: &str = "index.html";

/// Why an import was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("only .html files can be opened")]
    UnsupportedExtension,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl App {
    /// Handle side effects for messages that touch the filesystem. Runs
    /// after the pure update.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::PromptSubmit => {
                if let Some(path) = model.pending_import.take() {
                    match import_html(model, Path::new(&path)) {
                        Ok(()) => {
                            model.show_toast(ToastLevel::Info, format!("Opened {path}"));
                        }
                        Err(err) => {
                            model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                            tracing::warn!(path, error = %err, "import failed");
                        }
                    }
                }
            }
            Message::Export => match std::fs::write(EXPORT_FILE_NAME, model.buffer.text()) {
                Ok(()) => {
                    model.buffer.mark_clean();
                    model.show_toast(ToastLevel::Info, format!("Exported {EXPORT_FILE_NAME}"));
                }
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                    tracing::warn!(error = %err, "export failed");
                }
            },
            _ => {}
        }
    }
}

/// Replace the buffer with the contents of an `.html` file and rebuild
/// the preview immediately.
pub(super) fn import_html(model: &mut Model, path: &Path) -> Result<(), ImportError> {
    // Literal suffix check; `.HTML` and friends are rejected.
    if !path.to_string_lossy().ends_with(".html") {
        return Err(ImportError::UnsupportedExtension);
    }
    let content = std::fs::read_to_string(path)?;

    model.buffer.set_text(&content);
    model.file_path = Some(path.to_path_buf());

    // One cycle right away so the preview never shows the previous file;
    // the revision bump also schedules the normal debounced cycle, which
    // is idempotent over unchanged content.
    let content = model.buffer.text();
    model.sync.run_update_cycle(&content);
    model
        .preview_view
        .set_total_lines(model.sync.preview().line_count());
    model
        .editor_view
        .set_total_lines(model.buffer.line_count());
    model.selection = None;
    Ok(())
}
