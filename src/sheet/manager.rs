use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::config::{ImportPolicy, SheetConfig};
use crate::error::{ExportError, ImportError, ParseError, PersistError};
use crate::sheet::{Sheet, SheetGrid};
use crate::store::Store;

/// An exported snapshot ready to be written somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: String,
    pub contents: String,
}

/// Owns the live sheet and moves it between the grid, the durable store and
/// export files.
///
/// Nothing is persisted implicitly: edits stay in memory until [`persist`],
/// [`reset_to_blank`] or a successful [`import_snapshot`].
///
/// [`persist`]: SheetManager::persist
/// [`reset_to_blank`]: SheetManager::reset_to_blank
/// [`import_snapshot`]: SheetManager::import_snapshot
pub struct SheetManager {
    grid: SheetGrid,
    config: SheetConfig,
    store: Box<dyn Store>,
}

impl SheetManager {
    /// Create a manager with an empty grid; call [`SheetManager::load`] to
    /// bring in the stored sheet.
    pub fn new(config: SheetConfig, store: Box<dyn Store>) -> Self {
        Self {
            grid: SheetGrid::new(config.cols),
            config,
            store,
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn grid(&self) -> &SheetGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SheetGrid {
        &mut self.grid
    }

    /// Snapshot of exactly what is currently editable
    pub fn capture_state(&self) -> Sheet {
        self.grid.snapshot()
    }

    /// Replace the live sheet with `snapshot`, or with a blank sheet when it
    /// is absent or has no rows.
    pub fn apply_state(&mut self, snapshot: Option<&Sheet>) {
        self.grid
            .load(snapshot, self.config.rows, self.config.import_policy);
    }

    /// Write the current sheet to the durable store
    pub fn persist(&mut self) -> Result<(), PersistError> {
        let serialized = serde_json::to_string(&self.capture_state())?;
        self.store.set(&self.config.storage_key, &serialized)?;
        tracing::info!(
            key = %self.config.storage_key,
            rows = self.grid.row_count(),
            bytes = serialized.len(),
            "Sheet saved"
        );
        Ok(())
    }

    /// Read the stored sheet.
    ///
    /// Never fails: a missing key, an unreadable store or malformed JSON all
    /// yield the blank sheet. Parsed content is returned without any shape
    /// checks.
    pub fn restore(&self) -> Sheet {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Sheet::blank(&self.config),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored sheet, starting blank");
                return Sheet::blank(&self.config);
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => {
                let sheet = Sheet::from_value(value);
                self.note_invalid_cells(&sheet, "restore");
                sheet
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored sheet is not valid JSON, starting blank");
                Sheet::blank(&self.config)
            }
        }
    }

    /// Startup entry point: restore the stored sheet and make it live
    pub fn load(&mut self) -> Sheet {
        let restored = self.restore();
        self.apply_state(Some(&restored));
        tracing::info!(rows = self.grid.row_count(), "Sheet loaded");
        self.capture_state()
    }

    /// Blank the sheet and save it, but only if `confirm` agrees.
    ///
    /// Returns `Ok(false)` when the confirmation was declined, in which case
    /// nothing changed.
    pub fn reset_to_blank<F>(&mut self, confirm: F) -> Result<bool, PersistError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            tracing::debug!("Clear declined");
            return Ok(false);
        }

        self.apply_state(None);
        tracing::info!("Sheet cleared");
        self.persist()?;
        Ok(true)
    }

    /// Pretty-printed JSON of the current sheet, named after the current time
    pub fn export_snapshot(&self) -> Result<Export, ExportError> {
        self.export_snapshot_at(Utc::now())
    }

    pub fn export_snapshot_at(&self, now: DateTime<Utc>) -> Result<Export, ExportError> {
        let contents = serde_json::to_string_pretty(&self.capture_state())?;
        Ok(Export {
            filename: export_filename(&self.config.export_prefix, now),
            contents,
        })
    }

    /// Export the current sheet into `dir`, returning the written path
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let export = self.export_snapshot()?;
        let path = dir.join(&export.filename);
        fs::write(&path, &export.contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Sheet exported");
        Ok(path)
    }

    /// Parse `raw_text`, make it the live sheet and save it.
    ///
    /// Invalid JSON is reported and leaves the sheet untouched. Any valid JSON
    /// is accepted; missing or odd fields fall back to blanks.
    pub fn import_snapshot(&mut self, raw_text: &str) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(raw_text).map_err(ParseError)?;
        let snapshot = Sheet::from_value(value);
        self.note_invalid_cells(&snapshot, "import");

        self.apply_state(Some(&snapshot));
        tracing::info!(
            rows = snapshot.row_count(),
            live_rows = self.grid.row_count(),
            "Sheet imported"
        );
        self.persist()?;
        Ok(())
    }
}

impl SheetManager {
    fn note_invalid_cells(&self, sheet: &Sheet, source: &str) {
        let invalid = sheet.invalid_cells();
        if invalid == 0 {
            return;
        }

        match self.config.import_policy {
            ImportPolicy::Preserve => tracing::warn!(
                source,
                invalid,
                "Sheet holds cells that are not single letters, keeping them as-is"
            ),
            ImportPolicy::Sanitize => tracing::debug!(source, invalid, "Filtering loaded cells"),
        }
    }
}

/// `<prefix>-<ISO 8601 UTC timestamp with ':' and '.' as '-'>.json`
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{prefix}-{timestamp}.json")
}
