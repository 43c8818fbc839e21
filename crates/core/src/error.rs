//! 에러 타입 -- 도메인별 에러 정의

/// livecheck 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LivecheckError {
    /// 사용법 에러 (치명적, 사용자에게 그대로 노출)
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// tap 관련 에러
    #[error("tap error: {0}")]
    Tap(#[from] TapError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 사용법 에러
///
/// 실행을 중단시키는 유일한 선택 단계 에러입니다.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    /// 선택 모드도, 인자도, watchlist 파일도 없음
    #[error("a watchlist file is required when no arguments are given (looked for {path})")]
    NoWatchlist { path: String },

    /// 필터링 없이 후보가 하나도 남지 않음
    #[error("no formulae or casks to check")]
    NothingToCheck,

    /// 동시에 지정할 수 없는 플래그 조합
    #[error("options --{first} and --{second} are mutually exclusive")]
    ConflictingFlags {
        first: &'static str,
        second: &'static str,
    },
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// tap 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum TapError {
    /// `user/repo` 형식이 아닌 tap 이름
    #[error("invalid tap name '{name}': expected user/repo")]
    InvalidName { name: String },

    /// tap 디렉토리 목록 조회 실패
    #[error("failed to list {path}: {source}")]
    Listing {
        path: String,
        source: std::io::Error,
    },
}
