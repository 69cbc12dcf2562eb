use thiserror::Error;

/// CartesianTreeの操作に不正な位置・区間が渡されたときのエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range {start}..{end} is empty or inverted")]
    InvalidRange { start: usize, end: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
