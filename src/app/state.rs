use std::path::PathBuf;

use ratatui_textarea::TextArea;

use crate::sheet::SheetManager;

pub enum InputMode {
    Normal,
    Notes,
    Command,
    ConfirmClear,
    Help,
}

pub struct AppState<'a> {
    pub manager: SheetManager,
    pub export_dir: PathBuf,
    pub selected_cell: (usize, usize), // (row, col), zero-based
    pub start_row: usize,
    pub visible_rows: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub text_area: TextArea<'a>, // Notes editor
    pub should_quit: bool,
    pub is_modified: bool, // Edits since the last save
    pub notification_messages: Vec<String>,
    pub max_notifications: usize,
    pub help_text: String,
    pub help_scroll: usize,
    pub help_visible_lines: usize,
}

impl AppState<'_> {
    /// Load the stored sheet into `manager` and start in normal mode
    pub fn new(mut manager: SheetManager, export_dir: PathBuf) -> Self {
        manager.load();

        Self {
            manager,
            export_dir,
            selected_cell: (0, 0),
            start_row: 0,
            visible_rows: 10, // Adjusted to the window on first draw
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            text_area: TextArea::default(),
            should_quit: false,
            is_modified: false,
            notification_messages: Vec::new(),
            max_notifications: 5,
            help_text: String::new(),
            help_scroll: 0,
            help_visible_lines: 20,
        }
    }

    pub fn add_notification(&mut self, message: String) {
        self.notification_messages.push(message);

        if self.notification_messages.len() > self.max_notifications {
            self.notification_messages.remove(0);
        }
    }

    pub fn get_cell_content(&self, row: usize, col: usize) -> &str {
        self.manager.grid().cell(row, col).unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.manager.grid().row_count()
    }

    pub fn col_count(&self) -> usize {
        self.manager.grid().col_count()
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();
    }

    pub fn add_char_to_input(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn delete_char_from_input(&mut self) {
        self.input_buffer.pop();
    }

    pub fn start_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer = String::new();
    }
}
