use std::path::Path;

use crate::app::AppState;

impl AppState<'_> {
    pub fn execute_command(&mut self) {
        let command = self.input_buffer.trim().to_string();
        self.input_mode = crate::app::InputMode::Normal;
        self.input_buffer = String::new();

        if command.is_empty() {
            return;
        }

        match command.as_str() {
            "w" => self.save(),
            "wq" | "x" => self.save_and_exit(),
            "q" => self.quit(),
            "q!" => self.exit_without_saving(),
            "ar" | "addrow" => self.add_row(),
            "dr" | "delrow" => self.remove_row(),
            "clear" => self.request_clear(),
            "notes" => self.start_notes_editing(),
            "help" => self.show_help(),
            "export" => self.export_to(None),
            _ => {
                // Handle commands with parameters
                if let Some(dir) = command.strip_prefix("export ") {
                    self.export_to(Some(dir.trim()));
                } else if let Some(path) = command.strip_prefix("import ") {
                    self.import_from(Path::new(path.trim()));
                } else if command == "import" {
                    self.add_notification("Usage: :import <file>".to_string());
                } else {
                    self.add_notification(format!("Unknown command: {}", command));
                }
            }
        }
    }
}
