use chrono::{DateTime, Local};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Whether the running platform can rewrite file creation times.
/// Resolved once from the compile target; `apply` branches on this flag.
pub fn creation_time_supported() -> bool {
    cfg!(target_os = "windows")
}

pub fn read_modified_datetime(path: &Path) -> Option<DateTime<Local>> {
    let metadata = fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    Some(DateTime::<Local>::from(modified))
}

/// Set both modification and access time to `target`, at second precision.
pub fn set_modified_accessed(path: &Path, target: &DateTime<Local>) -> Result<(), String> {
    let ft = FileTime::from_unix_time(target.timestamp(), 0);
    filetime::set_file_times(path, ft, ft)
        .map_err(|e| format!("更新日時の書き込みに失敗しました: {}", e))
}

#[cfg(target_os = "windows")]
pub fn set_creation_time(path: &Path, target: &DateTime<Local>) -> Result<(), String> {
    use std::ffi::OsStr;
    use std::iter;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::{CloseHandle, FILETIME, INVALID_HANDLE_VALUE};
    use windows_sys::Win32::Storage::FileSystem::{
        CreateFileW, SetFileTime, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_WRITE_ATTRIBUTES,
        OPEN_EXISTING,
    };

    fn wide(value: &OsStr) -> Vec<u16> {
        value.encode_wide().chain(iter::once(0)).collect()
    }

    // Unix seconds → Windows 100ns ticks since 1601-01-01.
    const UNIX_TO_WINDOWS_TICKS: u64 = 116_444_736_000_000_000;
    let ticks = (target.timestamp() as u64) * 10_000_000 + UNIX_TO_WINDOWS_TICKS;
    let creation = FILETIME {
        dwLowDateTime: ticks as u32,
        dwHighDateTime: (ticks >> 32) as u32,
    };

    let path_w = wide(path.as_os_str());
    unsafe {
        let handle = CreateFileW(
            path_w.as_ptr(),
            FILE_WRITE_ATTRIBUTES,
            FILE_SHARE_READ,
            std::ptr::null(),
            OPEN_EXISTING,
            FILE_ATTRIBUTE_NORMAL,
            std::ptr::null_mut(),
        );
        if handle == INVALID_HANDLE_VALUE {
            return Err(format!(
                "ファイルを開けませんでした: {}",
                std::io::Error::last_os_error()
            ));
        }
        let result = SetFileTime(handle, &creation, std::ptr::null(), std::ptr::null());
        CloseHandle(handle);
        if result == 0 {
            return Err(format!(
                "作成日時の書き込みに失敗しました: {}",
                std::io::Error::last_os_error()
            ));
        }
    }
    Ok(())
}

/// Creation-time rewriting is Windows-only; elsewhere the capability flag
/// keeps this from ever being called.
#[cfg(not(target_os = "windows"))]
pub fn set_creation_time(_path: &Path, _target: &DateTime<Local>) -> Result<(), String> {
    Ok(())
}
