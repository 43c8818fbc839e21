//! 선택 플래그 -- CLI 스위치의 평면 표현과 상호 배타 검증
//!
//! clap 선언에 충돌 규칙을 숨기지 않고, 해석 이전에
//! [`SelectionFlags::validate`]가 한 번에 검사합니다.

use livecheck_core::error::UsageError;
use livecheck_core::types::Kind;

/// 함께 쓸 수 없는 플래그 쌍 (검사 순서대로)
const CONFLICTS: [(&str, &str); 6] = [
    ("tap", "eval-all"),
    ("tap", "installed"),
    ("eval-all", "installed"),
    ("json", "debug"),
    ("formula", "cask"),
    ("formula", "extract-plist"),
];

/// 한 번의 실행에 주어진 선택/출력 플래그
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    /// `--tap=<user/repo>`
    pub tap: Option<String>,
    pub installed: bool,
    pub eval_all: bool,
    /// `--formula` / `--formulae`
    pub formula: bool,
    /// `--cask` / `--casks`
    pub cask: bool,
    pub extract_plist: bool,
    pub json: bool,
    pub debug: bool,
    pub full_name: bool,
    /// `-r` / `--resources`
    pub resources: bool,
    pub newer_only: bool,
    pub quiet: bool,
    pub verbose: bool,
    /// autobump 대상도 포함
    pub autobump: bool,
    /// 위치 인자로 주어진 식별자
    pub named: Vec<String>,
}

impl SelectionFlags {
    /// 상호 배타 플래그를 검사하고 종류 제한을 돌려줍니다.
    ///
    /// # Errors
    ///
    /// 충돌하는 첫 번째 쌍에 대해 `UsageError::ConflictingFlags`
    pub fn validate(&self) -> Result<KindFilter, UsageError> {
        for (first, second) in CONFLICTS {
            if self.is_set(first) && self.is_set(second) {
                return Err(UsageError::ConflictingFlags { first, second });
            }
        }
        Ok(self.kind_filter())
    }

    /// `--formula` / `--cask`로 결정되는 종류 제한
    pub fn kind_filter(&self) -> KindFilter {
        match (self.formula, self.cask) {
            (true, false) => KindFilter::FormulaOnly,
            (false, true) => KindFilter::CaskOnly,
            _ => KindFilter::Any,
        }
    }

    fn is_set(&self, flag: &str) -> bool {
        match flag {
            "tap" => self.tap.is_some(),
            "eval-all" => self.eval_all,
            "installed" => self.installed,
            "json" => self.json,
            "debug" => self.debug,
            "formula" => self.formula,
            "cask" => self.cask,
            "extract-plist" => self.extract_plist,
            _ => false,
        }
    }
}

/// 종류 제한
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// 제한 없음 (formula와 cask 모두)
    #[default]
    Any,
    /// formula만
    FormulaOnly,
    /// cask만
    CaskOnly,
}

impl KindFilter {
    /// 이 제한에서 해당 종류를 열거하는지 여부
    pub fn includes(&self, kind: Kind) -> bool {
        match self {
            Self::Any => true,
            Self::FormulaOnly => kind == Kind::Formula,
            Self::CaskOnly => kind == Kind::Cask,
        }
    }

    /// 정확히 한 종류로 제한되었는지 여부
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Self::Any)
    }
}
