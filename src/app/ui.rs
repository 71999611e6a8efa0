use std::fs;
use std::path::{Path, PathBuf};

use crate::app::{AppState, InputMode};
use crate::error::ImportError;

impl AppState<'_> {
    pub fn show_help(&mut self) {
        self.help_scroll = 0;

        self.help_text = "GRID:\n\
             A-Z         - Type a letter into the cell and move on\n\
             Arrows      - Move cursor\n\
             Tab         - Next cell\n\
             Shift+Tab   - Previous cell\n\
             Backspace   - Clear cell and move back\n\
             Delete      - Clear cell\n\
             Home / End  - Jump to first / last row\n\n\
             ROWS:\n\
             Ctrl+n, :ar, :addrow - Add a row at the bottom\n\
             Ctrl+d, :dr, :delrow - Remove the last row\n\n\
             NOTES:\n\
             Ctrl+e, :notes - Edit notes (Esc to finish)\n\n\
             FILE OPERATIONS:\n\
             Ctrl+s, :w  - Save locally\n\
             :wq, :x     - Save and quit\n\
             :q          - Quit (will warn if unsaved changes)\n\
             :q!         - Force quit without saving\n\
             :clear      - Clear the sheet (asks for confirmation)\n\
             :export [dir] - Export the sheet to a JSON file\n\
             :import <file> - Replace the sheet with a JSON file\n\n\
             Edits are only stored when you save, clear or import.\n\n\
             OTHER:\n\
             F1, :help   - Show this help"
            .to_string();

        self.input_mode = InputMode::Help;
    }

    pub fn save(&mut self) {
        match self.manager.persist() {
            Ok(()) => {
                self.is_modified = false;
                self.add_notification("Saved locally.".to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "Save failed");
                self.add_notification(format!("Save failed: {e}"));
            }
        }
    }

    pub fn save_and_exit(&mut self) {
        self.save();
        if !self.is_modified {
            self.should_quit = true;
        }
    }

    pub fn quit(&mut self) {
        if self.is_modified {
            self.add_notification(
                "Sheet has unsaved changes. Use :q! to force quit or :wq to save and quit."
                    .to_string(),
            );
        } else {
            self.should_quit = true;
        }
    }

    pub fn exit_without_saving(&mut self) {
        self.should_quit = true;
    }

    pub fn request_clear(&mut self) {
        self.input_mode = InputMode::ConfirmClear;
    }

    /// Answer the pending clear confirmation
    pub fn answer_clear(&mut self, confirmed: bool) {
        self.input_mode = InputMode::Normal;

        match self.manager.reset_to_blank(|| confirmed) {
            Ok(true) => {
                self.is_modified = false;
                self.clamp_selection();
                self.add_notification("Sheet cleared.".to_string());
            }
            Ok(false) => {}
            Err(e) => {
                // Blanked in memory, but the store still has the old sheet
                self.is_modified = true;
                self.clamp_selection();
                tracing::error!(error = %e, "Clear could not be saved");
                self.add_notification(format!("Cleared, but save failed: {e}"));
            }
        }
    }

    pub fn export_to(&mut self, dir: Option<&str>) {
        let dir = dir.map(PathBuf::from).unwrap_or_else(|| self.export_dir.clone());

        match self.manager.write_export(&dir) {
            Ok(path) => self.add_notification(format!("Exported to {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.add_notification(format!("Export failed: {e}"));
            }
        }
    }

    pub fn import_from(&mut self, path: &Path) {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                self.add_notification(format!("Cannot read {}: {e}", path.display()));
                return;
            }
        };

        match self.manager.import_snapshot(&raw) {
            Ok(()) => {
                self.is_modified = false;
                self.clamp_selection();
                self.add_notification("Imported.".to_string());
            }
            Err(ImportError::Parse(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "Rejected import");
                self.add_notification("Invalid JSON file.".to_string());
            }
            Err(ImportError::Persist(e)) => {
                self.is_modified = true;
                self.clamp_selection();
                tracing::error!(error = %e, "Imported sheet could not be saved");
                self.add_notification(format!("Imported, but save failed: {e}"));
            }
        }
    }
}
