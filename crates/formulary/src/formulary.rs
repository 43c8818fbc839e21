//! 파일시스템 기반 Formulary

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use livecheck_core::error::{LivecheckError, TapError};
use livecheck_core::pipeline::Formulary;
use livecheck_core::types::{Candidate, Kind, TapName};

use crate::tap::{Tap, discover_taps, file_name, subdirectories};

const CELLAR_DIR: &str = "Cellar";
const CASKROOM_DIR: &str = "Caskroom";

/// prefix와 repository 디렉토리를 읽는 [`Formulary`]
///
/// tap 목록은 [`open`](Self::open) 시점에 한 번 탐색합니다.
/// tap별 formula/cask 목록은 처음 필요할 때 한 번 읽고 인스턴스 안에 보관합니다.
/// 설치 목록은 호출할 때마다 디스크에서 읽습니다.
#[derive(Debug)]
pub struct FsFormulary {
    prefix: PathBuf,
    repository: PathBuf,
    taps: Vec<Tap>,
    members: Mutex<HashMap<(TapName, Kind), Arc<BTreeSet<String>>>>,
}

impl FsFormulary {
    /// # Errors
    ///
    /// `Library/Taps` 디렉토리가 있지만 읽을 수 없을 때.
    pub fn open(
        prefix: impl Into<PathBuf>,
        repository: impl Into<PathBuf>,
    ) -> Result<Self, TapError> {
        let prefix = prefix.into();
        let repository = repository.into();
        let taps = discover_taps(&repository)?;
        debug!(
            prefix = %prefix.display(),
            repository = %repository.display(),
            taps = taps.len(),
            "opened formulary"
        );
        Ok(Self {
            prefix,
            repository,
            taps,
            members: Mutex::new(HashMap::new()),
        })
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    /// 탐색된 tap (검색 순서대로)
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// 이름으로 tap을 찾습니다. 탐색되지 않은 tap은 예상 위치를 가리킵니다.
    fn tap(&self, name: &TapName) -> Tap {
        self.taps
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .unwrap_or_else(|| Tap::at(&self.repository, name.clone()))
    }

    fn member_cache(&self) -> MutexGuard<'_, HashMap<(TapName, Kind), Arc<BTreeSet<String>>>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// tap의 `kind` 구성원. 같은 (tap, kind)는 한 번만 디렉토리를 훑습니다.
    fn members(&self, tap: &Tap, kind: Kind) -> Result<Arc<BTreeSet<String>>, TapError> {
        let key = (tap.name().clone(), kind);
        if let Some(cached) = self.member_cache().get(&key) {
            return Ok(Arc::clone(cached));
        }

        let listed = Arc::new(match kind {
            Kind::Formula => tap.formula_names()?,
            Kind::Cask => tap.cask_tokens()?,
        });
        debug!(tap = %tap.name(), ?kind, count = listed.len(), "listed tap members");
        self.member_cache().insert(key, Arc::clone(&listed));
        Ok(listed)
    }

    fn candidate(kind: Kind, identifier: String, tap: Option<TapName>) -> Candidate {
        Candidate {
            kind,
            identifier,
            tap,
        }
    }

    fn list_tap(&self, name: &TapName, kind: Kind) -> Result<Vec<Candidate>, LivecheckError> {
        let tap = self.tap(name);
        let members = self.members(&tap, kind)?;
        Ok(members
            .iter()
            .map(|id| Self::candidate(kind, id.clone(), Some(name.clone())))
            .collect())
    }

    fn list_all(&self, kind: Kind) -> Result<Vec<Candidate>, LivecheckError> {
        let mut out = Vec::new();
        for tap in &self.taps {
            for id in self.members(tap, kind)?.iter() {
                out.push(Self::candidate(kind, id.clone(), Some(tap.name().clone())));
            }
        }
        Ok(out)
    }

    /// 설치 디렉토리 이름을 후보로 바꾸고, 처음 정의한 tap을 소유자로 붙입니다.
    fn list_installed(&self, kind: Kind) -> Result<Vec<Candidate>, LivecheckError> {
        let root = match kind {
            Kind::Formula => self.prefix.join(CELLAR_DIR),
            Kind::Cask => self.prefix.join(CASKROOM_DIR),
        };
        let installed = subdirectories(&root)?;
        if installed.is_empty() {
            return Ok(Vec::new());
        }

        let mut index = Vec::with_capacity(self.taps.len());
        for tap in &self.taps {
            index.push((tap.name(), self.members(tap, kind)?));
        }

        Ok(installed
            .iter()
            .filter_map(|path| file_name(path))
            .map(|id| {
                let owner = index
                    .iter()
                    .find(|(_, members)| members.contains(id))
                    .map(|(name, _)| (*name).clone());
                Self::candidate(kind, id.to_owned(), owner)
            })
            .collect())
    }

    fn find_in(&self, tap: &Tap, kind: Kind, id: &str) -> Result<Option<Candidate>, TapError> {
        let found = self.members(tap, kind)?.contains(id);
        Ok(found.then(|| Self::candidate(kind, id.to_owned(), Some(tap.name().clone()))))
    }
}

impl Formulary for FsFormulary {
    fn tap_formulae(&self, tap: &TapName) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_tap(tap, Kind::Formula)
    }

    fn tap_casks(&self, tap: &TapName) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_tap(tap, Kind::Cask)
    }

    fn installed_formulae(&self) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_installed(Kind::Formula)
    }

    fn installed_casks(&self) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_installed(Kind::Cask)
    }

    fn all_formulae(&self) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_all(Kind::Formula)
    }

    fn all_casks(&self) -> Result<Vec<Candidate>, LivecheckError> {
        self.list_all(Kind::Cask)
    }

    fn resolve(&self, identifier: &str) -> Result<Option<Candidate>, LivecheckError> {
        // user/repo/name
        if let Some((tap_part, id)) = identifier.rsplit_once('/') {
            let Ok(name) = tap_part.parse::<TapName>() else {
                debug!(identifier, "unparseable tap qualifier");
                return Ok(None);
            };
            let tap = self.tap(&name);
            for kind in [Kind::Formula, Kind::Cask] {
                if let Some(found) = self.find_in(&tap, kind, id)? {
                    return Ok(Some(found));
                }
            }
            return Ok(None);
        }

        for kind in [Kind::Formula, Kind::Cask] {
            for tap in &self.taps {
                if let Some(found) = self.find_in(tap, kind, identifier)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    fn autobump_set(&self, tap: &TapName) -> Result<BTreeSet<String>, LivecheckError> {
        Ok(self.tap(tap).autobump_list()?)
    }
}
