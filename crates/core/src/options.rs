//! 확인 엔진 옵션 -- 희소(sparse) 불리언 레코드
//!
//! 각 필드는 `Option<bool>`입니다. `None`은 "엔진 기본값 사용"을 뜻하며
//! `Some(false)`와 구분됩니다. 직렬화 시 `None` 필드는 생략됩니다.

use serde::{Deserialize, Serialize};

/// 확인 엔진에 전달되는 옵션
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<bool>,
    /// formula와 cask가 공존할 수 있을 때만 의미가 있는 이름 충돌 처리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_name_conflict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_plist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl CheckOptions {
    /// 명시적으로 지정된 항목만 `(키, 값)` 쌍으로 반환합니다.
    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        [
            ("json", self.json),
            ("full_name", self.full_name),
            ("handle_name_conflict", self.handle_name_conflict),
            ("check_resources", self.check_resources),
            ("newer_only", self.newer_only),
            ("extract_plist", self.extract_plist),
            ("quiet", self.quiet),
            ("debug", self.debug),
            ("verbose", self.verbose),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
