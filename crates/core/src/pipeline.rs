//! 협력자 trait -- 선택 파이프라인의 확장 포인트 정의
//!
//! 선택 파이프라인은 패키지 데이터베이스와 확인 엔진을 직접 알지 못합니다.
//! 두 협력자는 여기 정의된 trait으로만 접근합니다.

use std::collections::BTreeSet;

use crate::error::LivecheckError;
use crate::options::CheckOptions;
use crate::types::{Candidate, TapName};

/// formula / cask 목록과 tap 정보를 제공하는 trait
///
/// 새로운 패키지 데이터 소스를 지원하려면 이 trait을 구현합니다.
/// 반환되는 후보의 순서는 의미가 없습니다. 정렬은 파이프라인이 담당합니다.
pub trait Formulary: Send + Sync {
    /// tap에 정의된 formula
    fn tap_formulae(&self, tap: &TapName) -> Result<Vec<Candidate>, LivecheckError>;

    /// tap에 정의된 cask
    fn tap_casks(&self, tap: &TapName) -> Result<Vec<Candidate>, LivecheckError>;

    /// 설치된 formula
    fn installed_formulae(&self) -> Result<Vec<Candidate>, LivecheckError>;

    /// 설치된 cask
    fn installed_casks(&self) -> Result<Vec<Candidate>, LivecheckError>;

    /// 모든 tap의 모든 formula
    fn all_formulae(&self) -> Result<Vec<Candidate>, LivecheckError>;

    /// 모든 tap의 모든 cask
    fn all_casks(&self) -> Result<Vec<Candidate>, LivecheckError>;

    /// 식별자(`name` 또는 `user/repo/name`)를 후보로 해석합니다.
    ///
    /// 해석할 수 없는 식별자는 에러가 아니라 `Ok(None)`입니다.
    fn resolve(&self, identifier: &str) -> Result<Option<Candidate>, LivecheckError>;

    /// tap이 자동으로 버전을 올리는(autobump) 식별자 집합
    fn autobump_set(&self, tap: &TapName) -> Result<BTreeSet<String>, LivecheckError>;
}

/// 실제 업스트림 버전 확인을 수행하는 엔진 trait
pub trait CheckEngine: Send {
    /// 엔진 이름
    fn name(&self) -> &str;

    /// 정렬된 후보 목록과 옵션으로 확인을 실행합니다.
    fn run_checks(
        &mut self,
        candidates: &[Candidate],
        options: &CheckOptions,
    ) -> Result<(), LivecheckError>;
}
