mod edit;
mod navigation;
mod state;
mod ui;

pub use state::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::sheet::SheetManager;
    use crate::store::MemoryStore;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn app_with(store: MemoryStore) -> AppState<'static> {
        let manager = SheetManager::new(SheetConfig::default(), Box::new(store));
        AppState::new(manager, PathBuf::from("."))
    }

    fn app() -> AppState<'static> {
        app_with(MemoryStore::new())
    }

    #[test]
    fn test_typing_filters_and_advances() {
        let mut app = app();
        app.type_into_cell('q');
        assert_eq!(app.get_cell_content(0, 0), "Q");
        assert_eq!(app.selected_cell, (0, 1));
        assert!(app.is_modified);

        app.type_into_cell('5');
        assert_eq!(app.get_cell_content(0, 1), "");
        assert_eq!(app.selected_cell, (0, 1));
    }

    #[test]
    fn test_typing_wraps_to_next_row() {
        let mut app = app();
        app.selected_cell = (0, 12);
        app.type_into_cell('x');
        assert_eq!(app.get_cell_content(0, 12), "X");
        assert_eq!(app.selected_cell, (1, 0));
    }

    #[test]
    fn test_backspace_clears_and_moves_back() {
        let mut app = app();
        app.type_into_cell('a');
        app.selected_cell = (0, 0);
        app.backspace_cell();
        assert_eq!(app.get_cell_content(0, 0), "");
        assert_eq!(app.selected_cell, (0, 0));
    }

    #[test]
    fn test_remove_rows_clamps_selection() {
        let mut app = app();
        app.selected_cell = (5, 3);
        app.remove_row();
        assert_eq!(app.row_count(), 5);
        assert_eq!(app.selected_cell, (4, 3));

        for _ in 0..6 {
            app.remove_row();
        }
        assert_eq!(app.row_count(), 0);
        assert_eq!(app.selected_cell, (0, 3));
        app.type_into_cell('a');
        assert_eq!(app.row_count(), 0);
    }

    #[test]
    fn test_notes_editing_commits_on_confirm() {
        let mut app = app();
        app.start_notes_editing();
        app.text_area.insert_str("ideas");
        app.confirm_notes();
        assert_eq!(app.manager.grid().notes(), "ideas");
        assert!(app.is_modified);
        assert!(matches!(app.input_mode, InputMode::Normal));
    }

    #[test]
    fn test_save_resets_modified_flag() {
        let mut app = app();
        app.type_into_cell('z');
        app.save();
        assert!(!app.is_modified);
        assert_eq!(app.manager.restore().data[0][0], "Z");
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut app = app_with(MemoryStore::with_quota(8));
        app.type_into_cell('z');
        app.save();
        assert!(app.is_modified);
        assert_eq!(app.get_cell_content(0, 0), "Z");
        assert!(app.notification_messages.last().unwrap().starts_with("Save failed"));
    }

    #[test]
    fn test_quit_refuses_with_unsaved_changes() {
        let mut app = app();
        app.add_row();
        app.quit();
        assert!(!app.should_quit);
        app.exit_without_saving();
        assert!(app.should_quit);
    }

    #[test]
    fn test_clear_declined_keeps_sheet() {
        let mut app = app();
        app.type_into_cell('c');
        let before = app.manager.capture_state();
        app.request_clear();
        app.answer_clear(false);
        assert_eq!(app.manager.capture_state(), before);
    }

    #[test]
    fn test_clear_confirmed_blanks_sheet() {
        let mut app = app();
        app.add_row();
        app.type_into_cell('c');
        app.request_clear();
        app.answer_clear(true);
        assert_eq!(app.row_count(), 6);
        assert_eq!(app.get_cell_content(0, 0), "");
        assert!(!app.is_modified);
    }

    #[test]
    fn test_import_from_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, r#"{"data":[["H","I"]],"notes":"n"}"#).unwrap();
        fs::write(&bad, "not json").unwrap();

        let mut app = app();
        app.selected_cell = (4, 4);
        app.import_from(&good);
        assert_eq!(app.row_count(), 1);
        assert_eq!(app.get_cell_content(0, 1), "I");
        assert_eq!(app.selected_cell, (0, 4));

        app.import_from(&bad);
        assert_eq!(app.notification_messages.last().unwrap(), "Invalid JSON file.");
        assert_eq!(app.get_cell_content(0, 0), "H");
    }

    #[test]
    fn test_export_to_directory() {
        let dir = tempdir().unwrap();
        let mut app = app();
        app.export_to(dir.path().to_str());
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
