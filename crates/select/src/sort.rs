//! 결정적 정렬 -- 식별자 오름차순 안정 정렬

use livecheck_core::types::Candidate;

/// 후보를 `canonical_identifier` 오름차순으로 정렬합니다.
///
/// `sort_by`는 안정 정렬이므로 키가 같은 후보는 기존 상대 순서를 유지합니다.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.canonical_identifier().cmp(b.canonical_identifier()));
}
