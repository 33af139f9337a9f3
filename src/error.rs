use thiserror::Error;

/// 区間・添字の検査に失敗したときのエラー。
///
/// 検査は木を変更する前に行われるので、このエラーが返った時点で木は呼び出し前と同じ状態にある。
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("attempted to index slice from after maximum usize")]
    StartOverflow,
    #[error("attempted to index slice up to maximum usize")]
    EndOverflow,
    #[error("slice index starts at {start} but ends at {end}")]
    StartAfterEnd { start: usize, end: usize },
    #[error("range end index {end} out of range for slice of length {len}")]
    EndOutOfRange { end: usize, len: usize },
    #[error("index {index} out of range for slice of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RangeError>;
