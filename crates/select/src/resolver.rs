//! 후보 소스 해석 -- 다섯 가지 선택 모드 중 하나를 골라 후보를 열거합니다.
//!
//! # 모드 우선순위 (먼저 일치하는 모드 사용)
//!
//! 1. `--tap` -- 해당 tap의 formula/cask 파일
//! 2. `--installed` -- 설치된 formula/cask
//! 3. 위치 인자 -- 각 식별자를 해석 (tap 간 조회 포함)
//! 4. `--eval-all` -- 모든 tap의 모든 formula/cask
//! 5. watchlist 파일이 존재 -- 파일의 식별자를 해석
//!
//! 아무 모드도 해당하지 않으면 `UsageError::NoWatchlist`입니다.
//!
//! 종류 제한(`--formula`, `--cask`)은 1, 2, 4번 모드에만 적용됩니다.
//! 3, 5번 모드는 식별자가 가리키는 종류를 그대로 따릅니다.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use livecheck_core::error::{LivecheckError, UsageError};
use livecheck_core::pipeline::Formulary;
use livecheck_core::types::{Candidate, Kind, TapName};

use crate::flags::{KindFilter, SelectionFlags};
use crate::watchlist::read_watchlist;

/// 한 번의 실행에서 선택된 후보 소스
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// 특정 tap의 구성원
    Tap(String),
    /// 설치된 후보
    Installed,
    /// 위치 인자로 주어진 식별자
    Named(Vec<String>),
    /// 알려진 모든 후보
    EvalAll,
    /// watchlist 파일의 식별자
    Watchlist(PathBuf),
}

impl SelectionMode {
    /// 우선순위에 따라 정확히 하나의 모드를 고릅니다.
    ///
    /// # Errors
    ///
    /// 모드 플래그도 인자도 없고 `watchlist` 파일도 없으면 `UsageError::NoWatchlist`
    pub fn choose(flags: &SelectionFlags, watchlist: &Path) -> Result<Self, UsageError> {
        if let Some(tap) = &flags.tap {
            Ok(Self::Tap(tap.clone()))
        } else if flags.installed {
            Ok(Self::Installed)
        } else if !flags.named.is_empty() {
            Ok(Self::Named(flags.named.clone()))
        } else if flags.eval_all {
            Ok(Self::EvalAll)
        } else if watchlist.exists() {
            Ok(Self::Watchlist(watchlist.to_path_buf()))
        } else {
            Err(UsageError::NoWatchlist {
                path: watchlist.display().to_string(),
            })
        }
    }

    /// 로그용 모드 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap(_) => "tap",
            Self::Installed => "installed",
            Self::Named(_) => "named",
            Self::EvalAll => "eval-all",
            Self::Watchlist(_) => "watchlist",
        }
    }
}

/// 선택 모드를 [`Formulary`] 호출로 옮기는 해석기
pub struct SourceResolver<'a, F: Formulary + ?Sized> {
    formulary: &'a F,
    kinds: KindFilter,
}

impl<'a, F: Formulary + ?Sized> SourceResolver<'a, F> {
    pub fn new(formulary: &'a F, kinds: KindFilter) -> Self {
        Self { formulary, kinds }
    }

    /// 모드에 해당하는 후보 목록을 만듭니다.
    ///
    /// 같은 종류 안에서 식별자가 겹치면 첫 번째만 남깁니다. 여러 tap에 같은
    /// 이름이 있으면 [`Formulary`]가 먼저 돌려준 쪽(공식 tap 우선)이 남습니다.
    ///
    /// # Errors
    ///
    /// 잘못된 tap 이름이나 목록 조회 실패 등 [`Formulary`] 에러를 그대로 전파합니다.
    /// watchlist 읽기 실패는 에러가 아니라 경고 후 빈 목록입니다.
    pub fn resolve(&self, mode: &SelectionMode) -> Result<Vec<Candidate>, LivecheckError> {
        info!(mode = mode.name(), "resolving candidates");

        let candidates = match mode {
            SelectionMode::Tap(name) => {
                let tap: TapName = name.parse()?;
                self.enumerate(
                    || self.formulary.tap_formulae(&tap),
                    || self.formulary.tap_casks(&tap),
                )?
            }
            SelectionMode::Installed => self.enumerate(
                || self.formulary.installed_formulae(),
                || self.formulary.installed_casks(),
            )?,
            SelectionMode::Named(identifiers) => self.resolve_identifiers(identifiers)?,
            SelectionMode::EvalAll => self.enumerate(
                || self.formulary.all_formulae(),
                || self.formulary.all_casks(),
            )?,
            SelectionMode::Watchlist(path) => match read_watchlist(path) {
                Ok(identifiers) => self.resolve_identifiers(&identifiers)?,
                Err(e) => {
                    warn!(error = %e, "could not read watchlist, continuing without it");
                    Vec::new()
                }
            },
        };

        Ok(dedup(candidates))
    }

    /// 종류 제한을 적용해 formula와 cask를 열거합니다. 제외된 종류는 호출하지 않습니다.
    fn enumerate(
        &self,
        formulae: impl FnOnce() -> Result<Vec<Candidate>, LivecheckError>,
        casks: impl FnOnce() -> Result<Vec<Candidate>, LivecheckError>,
    ) -> Result<Vec<Candidate>, LivecheckError> {
        let mut out = Vec::new();
        if self.kinds.includes(Kind::Formula) {
            out.extend(formulae()?);
        }
        if self.kinds.includes(Kind::Cask) {
            out.extend(casks()?);
        }
        Ok(out)
    }

    /// 식별자를 하나씩 해석합니다. 해석되지 않는 식별자는 조용히 버립니다.
    fn resolve_identifiers(&self, identifiers: &[String]) -> Result<Vec<Candidate>, LivecheckError> {
        let mut out = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            match self.formulary.resolve(identifier)? {
                Some(candidate) => out.push(candidate),
                None => debug!(identifier = %identifier, "no formula or cask found, ignoring"),
            }
        }
        Ok(out)
    }
}

/// 엔진에는 종류별로 식별자당 하나의 후보만 전달됩니다.
fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert((c.kind, c.canonical_identifier().to_owned()));
            if !fresh {
                debug!(candidate = %c, "duplicate identifier, keeping first");
            }
            fresh
        })
        .collect()
}
