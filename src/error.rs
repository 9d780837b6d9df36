use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("リクエストエラー: {0}")]
    InvalidRequest(String),
    #[error("IOエラー: {0}")]
    Io(String),
    #[error("非対応のマウント: {0}")]
    UnsupportedMount(String),
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
