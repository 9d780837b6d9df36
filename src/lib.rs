mod error;
mod file_times;
mod model;
mod patterns;
mod reconcile;

pub use error::AppError;
pub use file_times::creation_time_supported;
pub use model::{
    ApplyDetail, ApplyOptions, ApplyResponse, FileEntry, FileStatus, OperationProgressEvent,
    ScanResponse, NO_DATE_PLACEHOLDER,
};
pub use patterns::extract_datetime;
pub use reconcile::{apply, scan, DISPLAY_DATETIME_FORMAT, IMAGE_EXTENSIONS};
