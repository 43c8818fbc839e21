//! 설정 관리 -- livecheck.toml 파싱 및 런타임 설정
//!
//! [`LivecheckConfig`]는 CLI가 사용하는 최상위 설정 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`HOMEBREW_LIVECHECK_WATCHLIST`, `HOMEBREW_PREFIX` 등)
//! 3. 설정 파일 (`livecheck.toml`, 선택)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), livecheck_core::error::LivecheckError> {
//! use livecheck_core::config::LivecheckConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LivecheckConfig::load("livecheck.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LivecheckConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LivecheckError};

/// watchlist 기본 위치 (`$HOME` 기준)
pub const DEFAULT_WATCHLIST: &str = ".homebrew/livecheck_watchlist.txt";
/// 이전 버전의 watchlist 위치 (`$HOME` 기준)
pub const LEGACY_WATCHLIST: &str = ".brew_livecheck_watchlist";

/// livecheck 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LivecheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 경로 설정
    #[serde(default)]
    pub paths: PathsConfig,
    /// 선택 동작 설정
    #[serde(default)]
    pub livecheck: SelectionConfig,
}

impl LivecheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LivecheckError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 주어지면 [`load`](Self::load), 아니면 기본값에 환경변수만 적용합니다.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, LivecheckError> {
        match path {
            Some(path) => Self::load(path).await,
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LivecheckError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LivecheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LivecheckError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LivecheckError> {
        toml::from_str(toml_str).map_err(|e| {
            LivecheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// Homebrew 호환 변수(`HOMEBREW_*`)와 로깅 변수(`LIVECHECK_*`)를 읽습니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LIVECHECK_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LIVECHECK_LOG_FORMAT");

        // Paths
        override_string(&mut self.paths.prefix, "HOMEBREW_PREFIX");
        override_optional(&mut self.paths.repository, "HOMEBREW_REPOSITORY");
        override_optional(&mut self.paths.watchlist, "HOMEBREW_LIVECHECK_WATCHLIST");

        // Selection
        override_flag(&mut self.livecheck.autobump, "HOMEBREW_LIVECHECK_AUTOBUMP");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LivecheckError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.paths.prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.prefix".to_owned(),
                reason: "prefix must not be empty".to_owned(),
            }
            .into());
        }

        if self.paths.watchlist.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "paths.watchlist".to_owned(),
                reason: "watchlist path must not be empty when set".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 경로 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// 설치 prefix (`Cellar/`, `Caskroom/`이 위치하는 곳)
    pub prefix: String,
    /// tap 저장소 루트 (`Library/Taps/`의 상위). 없으면 prefix와 같음
    pub repository: Option<String>,
    /// watchlist 파일 경로. 없으면 홈 디렉토리 기본값 사용
    pub watchlist: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix().to_owned(),
            repository: None,
            watchlist: None,
        }
    }
}

impl PathsConfig {
    /// 설치 prefix 경로
    pub fn prefix_dir(&self) -> PathBuf {
        PathBuf::from(&self.prefix)
    }

    /// tap 저장소 루트 경로
    pub fn repository_dir(&self) -> PathBuf {
        self.repository
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.prefix_dir())
    }

    /// 실제로 사용할 watchlist 경로를 결정합니다.
    ///
    /// 1. 설정/환경변수 값 (`~/` 확장)
    /// 2. `$HOME/.homebrew/livecheck_watchlist.txt`
    /// 3. 2가 없고 `$HOME/.brew_livecheck_watchlist`가 있으면 이전 경로
    pub fn watchlist_path(&self, home: Option<&Path>) -> PathBuf {
        if let Some(configured) = &self.watchlist {
            return expand_home(configured, home);
        }

        let home = home.map(Path::to_path_buf).unwrap_or_default();
        let default = home.join(DEFAULT_WATCHLIST);
        let legacy = home.join(LEGACY_WATCHLIST);
        if !default.exists() && legacy.exists() {
            legacy
        } else {
            default
        }
    }
}

/// 선택 동작 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// autobump 대상 후보도 확인할지 여부 (`true`면 autobump 필터 비활성화)
    pub autobump: bool,
}

/// `$HOME` 환경변수 값
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn default_prefix() -> &'static str {
    if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
        "/opt/homebrew"
    } else if cfg!(target_os = "macos") {
        "/usr/local"
    } else {
        "/home/linuxbrew/.linuxbrew"
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key)
        && !val.is_empty()
    {
        *target = val;
    }
}

fn override_optional(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key)
        && !val.is_empty()
    {
        *target = Some(val);
    }
}

/// Homebrew 방식의 불리언 환경변수: 설정되어 있고 비어있지 않으면 참.
/// `0`, `false`, `no`, `off`는 명시적 거짓으로 취급합니다.
fn override_flag(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "0" | "false" | "no" | "off" => *target = false,
            "1" | "true" | "yes" | "on" => *target = true,
            other => {
                warn!(
                    env_key,
                    value = other,
                    "unrecognized boolean in env var, treating as set"
                );
                *target = true;
            }
        }
    }
}
