//! tap 디렉토리 조회
//!
//! tap 하나는 `<repository>/Library/Taps/<user>/homebrew-<repo>/` 디렉토리입니다.
//! 존재하지 않는 디렉토리는 빈 목록으로 취급하고, 존재하지만 읽을 수 없는
//! 디렉토리만 [`TapError::Listing`]으로 보고합니다.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use livecheck_core::error::TapError;
use livecheck_core::types::TapName;

/// tap 루트 아래의 상대 경로
const TAPS_DIR: &str = "Library/Taps";
const FORMULA_DIR: &str = "Formula";
const CASKS_DIR: &str = "Casks";
const AUTOBUMP_FILE: &str = ".github/autobump.txt";
const RUBY_EXT: &str = "rb";
const REPO_PREFIX: &str = "homebrew-";

/// 파일시스템 위의 tap 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tap {
    name: TapName,
    path: PathBuf,
}

impl Tap {
    /// repository 기준으로 tap 디렉토리 위치를 계산합니다.
    ///
    /// 디렉토리가 실제로 있는지는 확인하지 않습니다.
    pub fn at(repository: &Path, name: TapName) -> Self {
        let path = repository
            .join(TAPS_DIR)
            .join(name.user())
            .join(format!("{REPO_PREFIX}{}", name.repo()));
        Self { name, path }
    }

    pub fn name(&self) -> &TapName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// formula 이름 목록 (정렬됨)
    ///
    /// `Formula/` 디렉토리가 있으면 그 아래를 재귀적으로, 없으면 tap 루트의
    /// `*.rb` 파일만 봅니다.
    pub fn formula_names(&self) -> Result<BTreeSet<String>, TapError> {
        let formula_dir = self.path.join(FORMULA_DIR);
        let mut names = BTreeSet::new();
        if formula_dir.is_dir() {
            collect_ruby_stems(&formula_dir, true, &mut names)?;
        } else {
            collect_ruby_stems(&self.path, false, &mut names)?;
        }
        Ok(names)
    }

    /// cask token 목록 (정렬됨)
    pub fn cask_tokens(&self) -> Result<BTreeSet<String>, TapError> {
        let mut tokens = BTreeSet::new();
        collect_ruby_stems(&self.path.join(CASKS_DIR), true, &mut tokens)?;
        Ok(tokens)
    }

    /// `.github/autobump.txt`의 식별자 집합
    ///
    /// 파일이 없으면 빈 집합입니다.
    pub fn autobump_list(&self) -> Result<BTreeSet<String>, TapError> {
        let path = self.path.join(AUTOBUMP_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(listing_error(&path, e)),
        };

        let list: BTreeSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();
        debug!(tap = %self.name, entries = list.len(), "loaded autobump list");
        Ok(list)
    }
}

/// repository 아래의 모든 tap을 찾습니다.
///
/// 순서는 `homebrew/core`, `homebrew/cask`, 나머지는 tap 이름순입니다.
/// `homebrew-` 접두사가 없거나 이름이 유효하지 않은 디렉토리는 건너뜁니다.
pub fn discover_taps(repository: &Path) -> Result<Vec<Tap>, TapError> {
    let taps_dir = repository.join(TAPS_DIR);
    let mut taps = Vec::new();

    for user_dir in subdirectories(&taps_dir)? {
        let Some(user) = file_name(&user_dir) else {
            continue;
        };
        for repo_dir in subdirectories(&user_dir)? {
            let Some(repo) = file_name(&repo_dir) else {
                continue;
            };
            if !repo.starts_with(REPO_PREFIX) {
                debug!(path = %repo_dir.display(), "not a tap directory, skipping");
                continue;
            }
            match TapName::new(user, repo) {
                Ok(name) => taps.push(Tap {
                    name,
                    path: repo_dir.clone(),
                }),
                Err(e) => warn!(path = %repo_dir.display(), error = %e, "invalid tap directory, skipping"),
            }
        }
    }

    taps.sort_by(|a, b| tap_order(&a.name, &b.name));
    debug!(count = taps.len(), "discovered taps");
    Ok(taps)
}

/// 공식 tap이 먼저, 그다음 이름순
fn tap_order(a: &TapName, b: &TapName) -> std::cmp::Ordering {
    let rank = |t: &TapName| match (t.user(), t.repo()) {
        ("homebrew", "core") => 0,
        ("homebrew", "cask") => 1,
        _ => 2,
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// 디렉토리 바로 아래의 하위 디렉토리 (정렬됨, 숨김 디렉토리 제외)
pub(crate) fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, TapError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(listing_error(dir, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() && file_name(&path).is_some_and(|n| !n.starts_with('.')) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn collect_ruby_stems(
    dir: &Path,
    recursive: bool,
    out: &mut BTreeSet<String>,
) -> Result<(), TapError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(listing_error(dir, e)),
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                collect_ruby_stems(&path, true, out)?;
            }
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(RUBY_EXT) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            out.insert(stem.to_owned());
        }
    }
    Ok(())
}

pub(crate) fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn listing_error(path: &Path, source: io::Error) -> TapError {
    TapError::Listing {
        path: path.display().to_string(),
        source,
    }
}
