use crate::app::AppState;

impl AppState<'_> {
    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let max_row = self.row_count().saturating_sub(1) as isize;
        let max_col = self.col_count().saturating_sub(1) as isize;

        let new_row = (self.selected_cell.0 as isize + delta_row).clamp(0, max_row) as usize;
        let new_col = (self.selected_cell.1 as isize + delta_col).clamp(0, max_col) as usize;

        self.selected_cell = (new_row, new_col);
        self.handle_scrolling();
    }

    /// Advance one cell, wrapping to the start of the next row
    pub fn next_cell(&mut self) {
        let (row, col) = self.selected_cell;
        if col + 1 < self.col_count() {
            self.selected_cell = (row, col + 1);
        } else if row + 1 < self.row_count() {
            self.selected_cell = (row + 1, 0);
        }
        self.handle_scrolling();
    }

    /// Step back one cell, wrapping to the end of the previous row
    pub fn prev_cell(&mut self) {
        let (row, col) = self.selected_cell;
        if col > 0 {
            self.selected_cell = (row, col - 1);
        } else if row > 0 {
            self.selected_cell = (row - 1, self.col_count().saturating_sub(1));
        }
        self.handle_scrolling();
    }

    pub fn jump_to_first_row(&mut self) {
        self.selected_cell.0 = 0;
        self.handle_scrolling();
    }

    pub fn jump_to_last_row(&mut self) {
        self.selected_cell.0 = self.row_count().saturating_sub(1);
        self.handle_scrolling();
    }

    /// Pull the selection back inside the grid after rows were removed or replaced
    pub fn clamp_selection(&mut self) {
        let max_row = self.row_count().saturating_sub(1);
        let max_col = self.col_count().saturating_sub(1);
        self.selected_cell = (
            self.selected_cell.0.min(max_row),
            self.selected_cell.1.min(max_col),
        );
        self.handle_scrolling();
    }

    pub fn handle_scrolling(&mut self) {
        let visible_rows = self.visible_rows.max(1);

        if self.selected_cell.0 < self.start_row {
            self.start_row = self.selected_cell.0;
        } else if self.selected_cell.0 >= self.start_row + visible_rows {
            self.start_row = self.selected_cell.0 - visible_rows + 1;
        }

        // Never leave blank space below the last row when rows shrink
        let max_start = self.row_count().saturating_sub(visible_rows);
        self.start_row = self.start_row.min(max_start);
    }
}
