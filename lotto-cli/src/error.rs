use thiserror::Error;

/// Rejection of a candidate line. The whole batch is refused on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("{line}번째 줄: 번호가 {found}개뿐입니다 (최소 6개)")]
    TooFewNumbers { line: usize, found: usize },

    #[error("{line}번째 줄: '{token}'은(는) 숫자가 아닙니다")]
    InvalidToken { line: usize, token: String },
}

impl LineError {
    pub fn line(&self) -> usize {
        match self {
            LineError::TooFewNumbers { line, .. } | LineError::InvalidToken { line, .. } => *line,
        }
    }
}
