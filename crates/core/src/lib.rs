#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LivecheckError, TapError, UsageError};

// 설정
pub use config::LivecheckConfig;

// 엔진 옵션
pub use options::CheckOptions;

// 협력자 trait
pub use pipeline::{CheckEngine, Formulary};

// 도메인 타입
pub use types::{Candidate, Kind, TapName};
