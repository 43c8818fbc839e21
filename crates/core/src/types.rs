//! 도메인 타입 -- 선택 파이프라인 전역에서 사용되는 공통 타입
//!
//! formula / cask 후보와 이를 소유하는 tap을 정의합니다.
//! 두 종류는 [`Kind`]로 구분하며, 식별자는 항상
//! [`Candidate::canonical_identifier`] 하나로 접근합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TapError;

/// 후보 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// formula (식별자 = name)
    Formula,
    /// cask (식별자 = token)
    Cask,
}

impl Kind {
    /// 이 종류가 노출하는 식별자 필드 이름 ("name" 또는 "token")
    pub fn identifier_label(&self) -> &'static str {
        match self {
            Self::Formula => "name",
            Self::Cask => "token",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

/// tap 이름 (`user/repo`)
///
/// 저장소 이름의 `homebrew-` 접두사는 제거되고 소문자로 정규화됩니다.
/// `Homebrew/homebrew-core`와 `homebrew/core`는 같은 tap입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TapName {
    user: String,
    repo: String,
}

impl TapName {
    /// 정규화된 tap 이름을 생성합니다.
    pub fn new(user: &str, repo: &str) -> Result<Self, TapError> {
        let user = user.trim().to_lowercase();
        let repo = repo.trim().to_lowercase();
        let repo = repo.strip_prefix("homebrew-").unwrap_or(&repo).to_owned();

        let valid = |s: &str| {
            !s.is_empty()
                && !s.starts_with('.')
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid(&user) || !valid(&repo) {
            return Err(TapError::InvalidName {
                name: format!("{user}/{repo}"),
            });
        }

        Ok(Self { user, repo })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// 공식 tap (`homebrew/core`, `homebrew/cask`) 여부
    pub fn is_official_core(&self) -> bool {
        self.user == "homebrew" && (self.repo == "core" || self.repo == "cask")
    }
}

impl FromStr for TapName {
    type Err = TapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(repo), None) => Self::new(user, repo),
            _ => Err(TapError::InvalidName { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for TapName {
    type Error = TapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TapName> for String {
    fn from(tap: TapName) -> Self {
        tap.to_string()
    }
}

impl fmt::Display for TapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}

/// 확인 대상 후보 (formula 또는 cask)
///
/// `tap`은 소유 tap의 이름만 보관합니다. tap 자체(autobump 목록 등)는
/// [`Formulary`](crate::pipeline::Formulary)를 통해 조회합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// 후보 종류
    pub kind: Kind,
    /// formula name 또는 cask token
    pub identifier: String,
    /// 소유 tap (없을 수 있음)
    pub tap: Option<TapName>,
}

impl Candidate {
    pub fn formula(name: impl Into<String>, tap: Option<TapName>) -> Self {
        Self {
            kind: Kind::Formula,
            identifier: name.into(),
            tap,
        }
    }

    pub fn cask(token: impl Into<String>, tap: Option<TapName>) -> Self {
        Self {
            kind: Kind::Cask,
            identifier: token.into(),
            tap,
        }
    }

    /// 종류에 맞는 식별자 (formula는 name, cask는 token)
    pub fn canonical_identifier(&self) -> &str {
        &self.identifier
    }

    /// 정규화된 전체 이름
    ///
    /// 공식 tap 또는 tap이 없는 후보는 식별자 그대로,
    /// 그 외에는 `user/repo/identifier` 형식입니다.
    pub fn full_name(&self) -> String {
        match &self.tap {
            Some(tap) if !tap.is_official_core() => format!("{tap}/{}", self.identifier),
            _ => self.identifier.clone(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.kind)
    }
}
