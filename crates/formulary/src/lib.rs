//! # livecheck-formulary
//!
//! Homebrew 형식 디렉토리 구조를 읽는 [`Formulary`](livecheck_core::pipeline::Formulary) 구현체입니다.
//!
//! - [`tap`]: 단일 tap 디렉토리 목록 조회와 autobump 목록
//! - [`formulary`]: tap 탐색, 설치 목록, 식별자 해석

pub mod formulary;
pub mod tap;

pub use formulary::FsFormulary;
pub use tap::{Tap, discover_taps};
