use ratatui_textarea::TextArea;

use crate::app::{AppState, InputMode};
use crate::sheet::filter_cell;
use crate::utils::cell_reference;

impl AppState<'_> {
    /// Type a character into the selected cell.
    ///
    /// Input that filters down to nothing leaves the cell alone; a letter is
    /// stored and the cursor advances to the next cell.
    pub fn type_into_cell(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let letter = filter_cell(c.encode_utf8(&mut buf));
        if letter.is_empty() {
            return;
        }

        let (row, col) = self.selected_cell;
        if self.manager.grid_mut().set_cell(row, col, &letter).is_some() {
            self.is_modified = true;
            self.next_cell();
        }
    }

    pub fn clear_current_cell(&mut self) {
        let (row, col) = self.selected_cell;
        if self.manager.grid_mut().clear_cell(row, col) {
            self.is_modified = true;
        }
    }

    /// Clear the selected cell and step back one cell
    pub fn backspace_cell(&mut self) {
        self.clear_current_cell();
        self.prev_cell();
    }

    pub fn add_row(&mut self) {
        self.manager.grid_mut().add_row();
        self.is_modified = true;
        let rows = self.row_count();
        tracing::debug!(rows, "Row added");
        self.add_notification(format!("Row {rows} added"));
    }

    pub fn remove_row(&mut self) {
        if self.manager.grid_mut().remove_row() {
            self.is_modified = true;
            let rows = self.row_count();
            tracing::debug!(rows, "Row removed");
            self.clamp_selection();
            self.add_notification(format!("Last row removed, {rows} left"));
        } else {
            self.add_notification("No rows to remove".to_string());
        }
    }

    pub fn start_notes_editing(&mut self) {
        self.input_mode = InputMode::Notes;

        let mut text_area = TextArea::default();
        text_area.insert_str(self.manager.grid().notes());
        self.text_area = text_area;
    }

    pub fn confirm_notes(&mut self) {
        if let InputMode::Notes = self.input_mode {
            let notes = self.text_area.lines().join("\n");
            if notes != self.manager.grid().notes() {
                self.manager.grid_mut().set_notes(notes);
                self.is_modified = true;
            }
            self.input_mode = InputMode::Normal;
            self.text_area = TextArea::default();
        }
    }

    pub fn selected_reference(&self) -> String {
        cell_reference(self.selected_cell)
    }
}
