//! watchlist 읽기 에러
//!
//! [`WatchlistError`]는 치명적이지 않습니다. 선택 파이프라인은 이 에러를
//! 경고 로그로 남기고 빈 후보 목록으로 계속 진행합니다.

/// watchlist 파일 읽기 실패
#[derive(Debug, thiserror::Error)]
pub enum WatchlistError {
    /// 존재 확인 이후 파일이 사라짐
    #[error("watchlist not found: {path}")]
    NotFound {
        /// watchlist 경로
        path: String,
    },

    /// 그 밖의 읽기 실패 (권한, 잘못된 인코딩 등)
    #[error("failed to read watchlist {path}: {source}")]
    Read {
        /// watchlist 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl WatchlistError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.display().to_string(),
            }
        } else {
            Self::Read {
                path: path.display().to_string(),
                source,
            }
        }
    }
}
