use serde::{Deserialize, Serialize};

/// Placeholder shown in the date column when no pattern matched.
pub const NO_DATE_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    NoMatch,
    UpToDate,
    NeedsChange,
    Updated,
    Failed,
}

impl FileStatus {
    /// Label shown in the status column.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::NoMatch => "Invalid",
            FileStatus::UpToDate => "OK",
            FileStatus::NeedsChange => "Change",
            FileStatus::Updated => "Updated",
            FileStatus::Failed => "Failed",
        }
    }
}

/// One row of the scan table. Rebuilt on every scan; `status` is mutated in
/// place while apply runs. `status == NoMatch` exactly when
/// `extracted_datetime` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub file_name: String,
    pub extracted_datetime: Option<String>,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub folder_path: String,
    pub items: Vec<FileEntry>,
    pub total: usize,
    pub needs_change: usize,
    pub up_to_date: usize,
    pub no_match: usize,
    pub skipped_by_extension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOptions {
    pub rewrite_modify_access: bool,
    pub rewrite_creation: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            rewrite_modify_access: true,
            rewrite_creation: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyDetail {
    pub file_name: String,
    pub status: FileStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub processed: usize,
    pub updated: usize,
    pub failed: usize,
    pub items: Vec<FileEntry>,
    pub details: Vec<ApplyDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationProgressEvent {
    pub operation: String,
    pub processed: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub current_path: Option<String>,
    pub done: bool,
}
