//! 선택 파이프라인과 엔진 디스패치
//!
//! ```text
//! validate -> SelectionMode::choose -> SourceResolver -> AutobumpFilter -> sort
//!          -> (빈 결과 검사) -> build_options -> CheckEngine::run_checks
//! ```
//!
//! 모든 단계는 순차적으로 실행되며, 엔진은 필터링과 정렬이 끝난 뒤
//! 정확히 한 번 호출됩니다.

use std::path::PathBuf;

use tracing::info;

use livecheck_core::error::{LivecheckError, UsageError};
use livecheck_core::pipeline::{CheckEngine, Formulary};
use livecheck_core::types::Candidate;

use crate::autobump::AutobumpFilter;
use crate::flags::SelectionFlags;
use crate::options::build_options;
use crate::resolver::{SelectionMode, SourceResolver};
use crate::sort::sort_candidates;

/// 실행 시작 시 한 번 결정되는 값
///
/// 경로 조회나 환경변수 읽기를 파이프라인 도중에 반복하지 않도록
/// 호출자가 미리 계산해서 넘깁니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// 사용할 watchlist 경로
    pub watchlist_path: PathBuf,
    /// autobump 필터 적용 여부
    pub skip_autobump: bool,
}

impl RunContext {
    /// `--autobump` 플래그와 환경 수준 오버라이드 중 하나라도 켜져 있으면
    /// autobump 필터를 적용하지 않습니다.
    pub fn new(watchlist_path: impl Into<PathBuf>, autobump_flag: bool, autobump_env: bool) -> Self {
        Self {
            watchlist_path: watchlist_path.into(),
            skip_autobump: !autobump_flag && !autobump_env,
        }
    }
}

/// 선택 단계의 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 선택된 모드
    pub mode: SelectionMode,
    /// 필터링과 정렬을 마친 후보
    pub candidates: Vec<Candidate>,
    /// autobump로 제외된 후보가 있었는지
    pub skipped_autobump: bool,
}

/// 한 번의 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 엔진이 `count`개의 후보로 호출됨
    Checked { count: usize },
    /// 모든 후보가 autobump로 제외되어 엔진을 호출하지 않음
    AllAutobumped,
}

/// 플래그를 검증하고 후보를 선택, 필터링, 정렬합니다.
///
/// # Errors
///
/// - 충돌하는 플래그: `UsageError::ConflictingFlags`
/// - 선택 모드 없음: `UsageError::NoWatchlist`
/// - [`Formulary`] 에러는 그대로 전파
pub fn select<F: Formulary + ?Sized>(
    ctx: &RunContext,
    flags: &SelectionFlags,
    formulary: &F,
) -> Result<Selection, LivecheckError> {
    let kinds = flags.validate()?;
    let mode = SelectionMode::choose(flags, &ctx.watchlist_path)?;

    let resolved = SourceResolver::new(formulary, kinds).resolve(&mode)?;
    let resolved_count = resolved.len();

    let (mut candidates, skipped_autobump) = if ctx.skip_autobump {
        let outcome = AutobumpFilter::new(formulary).apply(resolved)?;
        (outcome.kept, outcome.skipped_autobump)
    } else {
        (resolved, false)
    };

    sort_candidates(&mut candidates);

    info!(
        mode = mode.name(),
        resolved = resolved_count,
        selected = candidates.len(),
        skipped_autobump,
        "selected candidates"
    );

    Ok(Selection {
        mode,
        candidates,
        skipped_autobump,
    })
}

/// 선택 후 확인 엔진을 한 번 호출합니다.
///
/// # Errors
///
/// [`select`]의 에러에 더해, 필터링 없이 후보가 비어 있으면
/// `UsageError::NothingToCheck`. 엔진 에러는 그대로 전파합니다.
pub fn run<F, E>(
    ctx: &RunContext,
    flags: &SelectionFlags,
    formulary: &F,
    engine: &mut E,
) -> Result<RunOutcome, LivecheckError>
where
    F: Formulary + ?Sized,
    E: CheckEngine + ?Sized,
{
    let selection = select(ctx, flags, formulary)?;

    if selection.candidates.is_empty() {
        if !selection.skipped_autobump {
            return Err(UsageError::NothingToCheck.into());
        }
        info!("all candidates are autobumped, nothing to check");
        return Ok(RunOutcome::AllAutobumped);
    }

    let options = build_options(flags);
    info!(
        engine = engine.name(),
        count = selection.candidates.len(),
        "dispatching checks"
    );
    engine.run_checks(&selection.candidates, &options)?;

    Ok(RunOutcome::Checked {
        count: selection.candidates.len(),
    })
}
