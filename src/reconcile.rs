use crate::error::AppError;
use crate::file_times::{
    creation_time_supported, read_modified_datetime, set_creation_time, set_modified_accessed,
};
use crate::model::{
    ApplyDetail, ApplyOptions, ApplyResponse, FileEntry, FileStatus, OperationProgressEvent,
    ScanResponse,
};
use crate::patterns::extract_datetime;
use chrono::{Local, NaiveDateTime, TimeZone, Timelike};
use std::fs;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "jxl", "cr2"];

/// GVFS mount prefix for MTP devices. Timestamp writes are not supported
/// on these mounts.
const MTP_MOUNT_MARKER: &str = "/gvfs/mtp:";

/// Format of the date column, and of the value apply parses back.
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn ensure_folder(folder_path: &str) -> Result<(), AppError> {
    if folder_path.contains(MTP_MOUNT_MARKER) {
        return Err(AppError::UnsupportedMount(
            "MTPデバイス上のタイムスタンプは直接変更できません。画像をローカルフォルダへコピーしてから実行してください。"
                .to_string(),
        ));
    }
    if !Path::new(folder_path).is_dir() {
        return Err(AppError::InvalidRequest(format!(
            "フォルダが無効です: {}",
            folder_path
        )));
    }
    Ok(())
}

/// List the folder and classify every image file against the date embedded
/// in its name.
pub fn scan(folder_path: &str) -> Result<ScanResponse, AppError> {
    ensure_folder(folder_path)?;

    let mut file_names: Vec<String> = Vec::new();
    let mut skipped_by_extension = 0usize;
    for entry in fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if has_image_extension(name) => file_names.push(name.to_string()),
            _ => skipped_by_extension += 1,
        }
    }
    file_names.sort();

    let mut items = Vec::with_capacity(file_names.len());
    let mut needs_change = 0usize;
    let mut up_to_date = 0usize;
    let mut no_match = 0usize;

    for file_name in file_names {
        let item = match extract_datetime(&file_name) {
            None => {
                no_match += 1;
                FileEntry {
                    file_name,
                    extracted_datetime: None,
                    status: FileStatus::NoMatch,
                }
            }
            Some(extracted) => {
                let status = classify(&Path::new(folder_path).join(&file_name), &extracted);
                match status {
                    FileStatus::UpToDate => up_to_date += 1,
                    _ => needs_change += 1,
                }
                FileEntry {
                    file_name,
                    extracted_datetime: Some(
                        extracted.format(DISPLAY_DATETIME_FORMAT).to_string(),
                    ),
                    status,
                }
            }
        };
        items.push(item);
    }

    Ok(ScanResponse {
        folder_path: folder_path.to_string(),
        total: items.len(),
        needs_change,
        up_to_date,
        no_match,
        skipped_by_extension,
        items,
    })
}

/// Rewrite timestamps for every entry the last scan flagged as needing a
/// change. Strictly sequential; one progress event after each file and a
/// final `done` event. A per-file failure marks that row and the batch
/// keeps going.
pub fn apply<FProgress>(
    folder_path: &str,
    entries: &[FileEntry],
    options: &ApplyOptions,
    mut report_progress: FProgress,
) -> Result<ApplyResponse, AppError>
where
    FProgress: FnMut(OperationProgressEvent),
{
    ensure_folder(folder_path)?;

    let mut items = entries.to_vec();
    let selected: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.status == FileStatus::NeedsChange)
        .map(|(index, _)| index)
        .collect();

    if selected.is_empty() {
        return Ok(ApplyResponse {
            processed: 0,
            updated: 0,
            failed: 0,
            items,
            details: Vec::new(),
        });
    }

    let total = selected.len();
    let mut details = Vec::with_capacity(total);
    let mut updated = 0usize;
    let mut failed = 0usize;
    let mut processed = 0usize;

    for index in selected {
        let file_name = items[index].file_name.clone();
        let path = Path::new(folder_path).join(&file_name);
        let displayed = items[index].extracted_datetime.clone();

        match rewrite_file_times(&path, displayed.as_deref(), options) {
            Ok(()) => {
                updated += 1;
                items[index].status = FileStatus::Updated;
                details.push(ApplyDetail {
                    file_name: file_name.clone(),
                    status: FileStatus::Updated,
                    reason: None,
                });
            }
            Err(reason) => {
                failed += 1;
                items[index].status = FileStatus::Failed;
                details.push(ApplyDetail {
                    file_name: file_name.clone(),
                    status: FileStatus::Failed,
                    reason: Some(reason),
                });
            }
        }

        processed += 1;
        report_progress(OperationProgressEvent {
            operation: "apply".to_string(),
            processed,
            total,
            succeeded: updated,
            failed,
            current_path: Some(file_name),
            done: false,
        });
    }

    report_progress(OperationProgressEvent {
        operation: "apply".to_string(),
        processed,
        total,
        succeeded: updated,
        failed,
        current_path: None,
        done: true,
    });

    Ok(ApplyResponse {
        processed,
        updated,
        failed,
        items,
        details,
    })
}

/// Compare the file's current modification time, truncated to whole
/// seconds, against the extracted value. Unequal or unreadable both mean
/// the file needs a rewrite.
fn classify(path: &Path, extracted: &NaiveDateTime) -> FileStatus {
    match read_modified_datetime(path) {
        Some(modified) => {
            if modified.naive_local().with_nanosecond(0) == Some(*extracted) {
                FileStatus::UpToDate
            } else {
                FileStatus::NeedsChange
            }
        }
        None => FileStatus::NeedsChange,
    }
}

/// Rewrite one file's timestamps from its displayed date string. The
/// displayed value is what the user saw (and may have edited), so it is
/// parsed back rather than re-derived from the file name.
fn rewrite_file_times(
    path: &Path,
    displayed: Option<&str>,
    options: &ApplyOptions,
) -> Result<(), String> {
    let displayed = displayed.ok_or_else(|| "日時が未設定です".to_string())?;
    let naive = NaiveDateTime::parse_from_str(displayed, DISPLAY_DATETIME_FORMAT)
        .map_err(|e| format!("日時の形式が不正です `{}`: {}", displayed, e))?;
    let target = Local
        .from_local_datetime(&naive)
        .single()
        .or_else(|| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| format!("ローカル時刻に変換できません: {}", displayed))?;

    if options.rewrite_modify_access {
        set_modified_accessed(path, &target)?;
    }
    if options.rewrite_creation && creation_time_supported() {
        set_creation_time(path, &target)?;
    }
    Ok(())
}

fn has_image_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|item| *item == ext)
        })
        .unwrap_or(false)
}
