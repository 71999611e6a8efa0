//! Sheet configuration
//!
//! The grid geometry and storage names are fixed for the core; the binary
//! only chooses where things live on disk and the import policy.

/// Number of blank rows a fresh sheet starts with
pub const DEFAULT_ROWS: usize = 6;

/// Fixed number of cells in every row
pub const COLS: usize = 13;

/// Durable store key holding the serialized sheet
pub const STORAGE_KEY: &str = "letter_sheet_v1";

/// Prefix used for exported file names
pub const EXPORT_PREFIX: &str = "LetterSheet";

/// Application name shown in the title bar
pub const APP_NAME: &str = "Letter Sheet";

/// How cell text coming from an imported or restored snapshot is treated.
///
/// Live typing is always filtered; snapshots are kept verbatim unless the
/// user opts into `Sanitize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    #[default]
    Preserve,
    Sanitize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
    pub storage_key: String,
    pub export_prefix: String,
    pub import_policy: ImportPolicy,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: COLS,
            storage_key: STORAGE_KEY.to_string(),
            export_prefix: EXPORT_PREFIX.to_string(),
            import_policy: ImportPolicy::Preserve,
        }
    }
}

impl SheetConfig {
    pub fn with_import_policy(mut self, policy: ImportPolicy) -> Self {
        self.import_policy = policy;
        self
    }
}
