//! autobump 필터 -- tap이 자동으로 버전을 올리는 후보를 제외합니다.
//!
//! tap별 autobump 집합은 해당 tap의 후보를 처음 만났을 때 한 번만 조회하고
//! 필터 인스턴스(= 한 번의 실행) 동안 캐시합니다.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use livecheck_core::error::LivecheckError;
use livecheck_core::pipeline::Formulary;
use livecheck_core::types::{Candidate, TapName};

/// 필터 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 남은 후보 (입력 순서 유지)
    pub kept: Vec<Candidate>,
    /// 하나 이상의 후보가 autobump로 제외되었는지
    pub skipped_autobump: bool,
    /// 제외된 후보 수
    pub skipped: usize,
}

/// 실행 단위 autobump 필터
pub struct AutobumpFilter<'a, F: Formulary + ?Sized> {
    formulary: &'a F,
    cache: HashMap<TapName, BTreeSet<String>>,
}

impl<'a, F: Formulary + ?Sized> AutobumpFilter<'a, F> {
    pub fn new(formulary: &'a F) -> Self {
        Self {
            formulary,
            cache: HashMap::new(),
        }
    }

    /// 후보를 한 번 훑어 autobump 대상을 제거합니다.
    ///
    /// tap이 없는 후보는 항상 남습니다.
    ///
    /// # Errors
    ///
    /// tap의 autobump 집합 조회 실패를 그대로 전파합니다.
    pub fn apply(&mut self, candidates: Vec<Candidate>) -> Result<FilterOutcome, LivecheckError> {
        let mut outcome = FilterOutcome {
            kept: Vec::with_capacity(candidates.len()),
            ..FilterOutcome::default()
        };

        for candidate in candidates {
            let Some(tap) = &candidate.tap else {
                outcome.kept.push(candidate);
                continue;
            };

            if self.autobumped(tap)?.contains(candidate.canonical_identifier()) {
                debug!(
                    kind = %candidate.kind,
                    identifier = candidate.canonical_identifier(),
                    tap = %tap,
                    "skipping autobumped candidate"
                );
                outcome.skipped_autobump = true;
                outcome.skipped += 1;
            } else {
                outcome.kept.push(candidate);
            }
        }

        Ok(outcome)
    }

    /// 조회가 일어난 tap 수
    pub fn cached_taps(&self) -> usize {
        self.cache.len()
    }

    fn autobumped(&mut self, tap: &TapName) -> Result<&BTreeSet<String>, LivecheckError> {
        if !self.cache.contains_key(tap) {
            let set = self.formulary.autobump_set(tap)?;
            self.cache.insert(tap.clone(), set);
        }
        // 바로 위에서 채웠으므로 항상 존재
        Ok(&self.cache[tap])
    }
}
