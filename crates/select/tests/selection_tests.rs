//! 선택 파이프라인 통합 테스트
//!
//! - 다섯 가지 선택 모드와 종류 제한
//! - autobump 필터와 빈 결과 처리
//! - 엔진 디스패치 횟수와 옵션

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use livecheck_core::error::{LivecheckError, UsageError};
use livecheck_core::options::CheckOptions;
use livecheck_core::pipeline::{CheckEngine, Formulary};
use livecheck_core::types::{Candidate, Kind, TapName};
use livecheck_select::{RunContext, RunOutcome, SelectionFlags, SelectionMode, run, select};

// =============================================================================
// 테스트 도우미
// =============================================================================

fn tap(name: &str) -> TapName {
    name.parse().expect("valid tap")
}

/// 메모리 기반 Formulary
#[derive(Default)]
struct MemoryFormulary {
    /// tap별 후보
    taps: BTreeMap<TapName, Vec<Candidate>>,
    /// 설치된 후보
    installed: Vec<Candidate>,
    /// tap별 autobump 목록
    autobump: BTreeMap<TapName, BTreeSet<String>>,
}

impl MemoryFormulary {
    fn with_tap(mut self, name: &str, formulae: &[&str], casks: &[&str]) -> Self {
        let t = tap(name);
        let members = formulae
            .iter()
            .map(|f| Candidate::formula(*f, Some(t.clone())))
            .chain(casks.iter().map(|c| Candidate::cask(*c, Some(t.clone()))))
            .collect();
        self.taps.insert(t, members);
        self
    }

    fn with_installed(mut self, candidates: Vec<Candidate>) -> Self {
        self.installed = candidates;
        self
    }

    fn with_autobump(mut self, name: &str, ids: &[&str]) -> Self {
        self.autobump
            .insert(tap(name), ids.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    fn of_kind(list: &[Candidate], kind: Kind) -> Vec<Candidate> {
        list.iter().filter(|c| c.kind == kind).cloned().collect()
    }

    /// 공식 tap을 먼저 나열합니다.
    fn everything(&self) -> Vec<Candidate> {
        let (official, third_party): (Vec<_>, Vec<_>) =
            self.taps.iter().partition(|(t, _)| t.is_official_core());
        official
            .into_iter()
            .chain(third_party)
            .flat_map(|(_, members)| members.iter().cloned())
            .collect()
    }
}

impl Formulary for MemoryFormulary {
    fn tap_formulae(&self, t: &TapName) -> Result<Vec<Candidate>, LivecheckError> {
        let members = self.taps.get(t).cloned().unwrap_or_default();
        Ok(Self::of_kind(&members, Kind::Formula))
    }

    fn tap_casks(&self, t: &TapName) -> Result<Vec<Candidate>, LivecheckError> {
        let members = self.taps.get(t).cloned().unwrap_or_default();
        Ok(Self::of_kind(&members, Kind::Cask))
    }

    fn installed_formulae(&self) -> Result<Vec<Candidate>, LivecheckError> {
        Ok(Self::of_kind(&self.installed, Kind::Formula))
    }

    fn installed_casks(&self) -> Result<Vec<Candidate>, LivecheckError> {
        Ok(Self::of_kind(&self.installed, Kind::Cask))
    }

    fn all_formulae(&self) -> Result<Vec<Candidate>, LivecheckError> {
        Ok(Self::of_kind(&self.everything(), Kind::Formula))
    }

    fn all_casks(&self) -> Result<Vec<Candidate>, LivecheckError> {
        Ok(Self::of_kind(&self.everything(), Kind::Cask))
    }

    fn resolve(&self, identifier: &str) -> Result<Option<Candidate>, LivecheckError> {
        let all = self.everything();
        let found = match identifier.rsplit_once('/') {
            Some((tap_part, name)) => {
                let t: TapName = tap_part.parse()?;
                all.into_iter()
                    .find(|c| c.tap.as_ref() == Some(&t) && c.identifier == name)
            }
            None => {
                let formula = all
                    .iter()
                    .find(|c| c.kind == Kind::Formula && c.identifier == identifier);
                formula
                    .or_else(|| all.iter().find(|c| c.identifier == identifier))
                    .cloned()
            }
        };
        Ok(found)
    }

    fn autobump_set(&self, t: &TapName) -> Result<BTreeSet<String>, LivecheckError> {
        Ok(self.autobump.get(t).cloned().unwrap_or_default())
    }
}

/// 호출 내용을 기록하는 엔진
#[derive(Default)]
struct RecordingEngine {
    calls: Vec<(Vec<Candidate>, CheckOptions)>,
}

impl CheckEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    fn run_checks(
        &mut self,
        candidates: &[Candidate],
        options: &CheckOptions,
    ) -> Result<(), LivecheckError> {
        self.calls.push((candidates.to_vec(), options.clone()));
        Ok(())
    }
}

fn no_watchlist() -> RunContext {
    RunContext::new("/nonexistent/livecheck_watchlist.txt", false, false)
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.canonical_identifier()).collect()
}

fn sample() -> MemoryFormulary {
    MemoryFormulary::default()
        .with_tap("homebrew/core", &["wget", "curl"], &[])
        .with_tap("homebrew/cask", &[], &["firefox", "alacritty"])
        .with_tap(
            "acme/tools",
            &["gadget", "tool"],
            &["widget", "dock", "beacon"],
        )
}

// =============================================================================
// 선택 모드
// =============================================================================

#[test]
fn tap_mode_with_cask_restriction_yields_sorted_casks() {
    let formulary = sample();
    let flags = SelectionFlags {
        tap: Some("acme/tools".to_owned()),
        cask: true,
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();

    assert_eq!(selection.mode, SelectionMode::Tap("acme/tools".to_owned()));
    assert_eq!(ids(&selection.candidates), vec!["beacon", "dock", "widget"]);
    assert!(selection.candidates.iter().all(|c| c.kind == Kind::Cask));
}

#[test]
fn tap_mode_without_restriction_includes_both_kinds() {
    let formulary = sample();
    let flags = SelectionFlags {
        tap: Some("acme/tools".to_owned()),
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(
        ids(&selection.candidates),
        vec!["beacon", "dock", "gadget", "tool", "widget"]
    );
}

#[test]
fn installed_mode_with_formula_restriction() {
    let core = Some(tap("homebrew/core"));
    let formulary = sample().with_installed(vec![
        Candidate::formula("wget", core.clone()),
        Candidate::cask("firefox", Some(tap("homebrew/cask"))),
        Candidate::formula("orphan", None),
    ]);
    let flags = SelectionFlags {
        installed: true,
        formula: true,
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["orphan", "wget"]);
}

#[test]
fn eval_all_mode_enumerates_every_tap() {
    let formulary = sample();
    let flags = SelectionFlags {
        eval_all: true,
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(selection.candidates.len(), 9);

    let casks_only = SelectionFlags {
        eval_all: true,
        cask: true,
        ..SelectionFlags::default()
    };
    let selection = select(&no_watchlist(), &casks_only, &formulary).unwrap();
    assert_eq!(
        ids(&selection.candidates),
        vec!["alacritty", "beacon", "dock", "firefox", "widget"]
    );
}

#[test]
fn same_formula_name_in_two_taps_is_checked_once() {
    let formulary = MemoryFormulary::default()
        .with_tap("homebrew/core", &["foo", "wget"], &[])
        .with_tap("acme/tools", &["foo"], &["foo"]);

    let eval_all = SelectionFlags {
        eval_all: true,
        formula: true,
        ..SelectionFlags::default()
    };
    let mut engine = RecordingEngine::default();
    let outcome = run(&no_watchlist(), &eval_all, &formulary, &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::Checked { count: 2 });
    let (candidates, _) = &engine.calls[0];
    assert_eq!(ids(candidates), vec!["foo", "wget"]);
    assert_eq!(candidates[0].tap, Some(tap("homebrew/core")));

    let named = SelectionFlags {
        named: vec!["foo".to_owned(), "acme/tools/foo".to_owned()],
        ..SelectionFlags::default()
    };
    let mut engine = RecordingEngine::default();
    let outcome = run(&no_watchlist(), &named, &formulary, &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::Checked { count: 1 });
    let (candidates, _) = &engine.calls[0];
    assert_eq!(candidates, &vec![Candidate::formula("foo", Some(tap("homebrew/core")))]);
}

#[test]
fn formula_and_cask_sharing_a_name_are_both_kept() {
    let formulary = MemoryFormulary::default().with_tap("acme/tools", &["foo"], &["foo"]);
    let flags = SelectionFlags {
        eval_all: true,
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    let kinds: Vec<Kind> = selection.candidates.iter().map(|c| c.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert!(kinds.contains(&Kind::Formula));
    assert!(kinds.contains(&Kind::Cask));
}

#[test]
fn named_mode_resolves_across_taps_and_ignores_kind_restriction() {
    let formulary = sample();
    let flags = SelectionFlags {
        formula: true,
        named: vec![
            "acme/tools/widget".to_owned(),
            "wget".to_owned(),
            "nonexistent".to_owned(),
        ],
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["wget", "widget"]);
    assert_eq!(selection.candidates[1].kind, Kind::Cask);
}

#[test]
fn watchlist_mode_reads_file_and_drops_unresolvable_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("livecheck_watchlist.txt");
    std::fs::write(&path, "# my list\n\nfirefox\n  curl  \nmissing-thing\n").unwrap();

    let formulary = sample();
    let ctx = RunContext::new(&path, false, false);
    let selection = select(&ctx, &SelectionFlags::default(), &formulary).unwrap();

    assert_eq!(selection.mode, SelectionMode::Watchlist(path.clone()));
    assert_eq!(ids(&selection.candidates), vec!["curl", "firefox"]);
}

#[test]
fn no_mode_and_no_watchlist_is_usage_error() {
    let formulary = sample();
    let err = select(&no_watchlist(), &SelectionFlags::default(), &formulary).unwrap_err();
    assert!(matches!(
        err,
        LivecheckError::Usage(UsageError::NoWatchlist { .. })
    ));
}

#[test]
fn conflicting_flags_fail_before_resolution() {
    let formulary = sample();
    let flags = SelectionFlags {
        tap: Some("not a tap".to_owned()),
        installed: true,
        ..SelectionFlags::default()
    };
    let err = select(&no_watchlist(), &flags, &formulary).unwrap_err();
    assert!(matches!(
        err,
        LivecheckError::Usage(UsageError::ConflictingFlags { .. })
    ));
}

// =============================================================================
// autobump + 디스패치
// =============================================================================

#[test]
fn autobumped_candidates_are_skipped_by_default() {
    let formulary = sample().with_autobump("homebrew/core", &["wget"]);
    let flags = SelectionFlags {
        tap: Some("homebrew/core".to_owned()),
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["curl"]);
    assert!(selection.skipped_autobump);
}

#[test]
fn autobump_flag_or_env_disables_filter() {
    let formulary = sample().with_autobump("homebrew/core", &["wget"]);
    let flags = SelectionFlags {
        tap: Some("homebrew/core".to_owned()),
        autobump: true,
        ..SelectionFlags::default()
    };

    let by_flag = RunContext::new("/nonexistent", flags.autobump, false);
    let selection = select(&by_flag, &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["curl", "wget"]);
    assert!(!selection.skipped_autobump);

    let by_env = RunContext::new("/nonexistent", false, true);
    let selection = select(&by_env, &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["curl", "wget"]);
}

#[test]
fn untapped_candidate_survives_matching_autobump_entry() {
    let formulary = sample()
        .with_autobump("homebrew/core", &["foo"])
        .with_installed(vec![
            Candidate::formula("foo", None),
            Candidate::formula("foo", Some(tap("homebrew/core"))),
        ]);
    let flags = SelectionFlags {
        installed: true,
        ..SelectionFlags::default()
    };

    let selection = select(&no_watchlist(), &flags, &formulary).unwrap();
    assert_eq!(selection.candidates, vec![Candidate::formula("foo", None)]);
    assert!(selection.skipped_autobump);
}

#[test]
fn everything_autobumped_succeeds_without_dispatch() {
    let formulary = sample().with_autobump("homebrew/core", &["wget", "curl"]);
    let flags = SelectionFlags {
        tap: Some("homebrew/core".to_owned()),
        ..SelectionFlags::default()
    };
    let mut engine = RecordingEngine::default();

    let outcome = run(&no_watchlist(), &flags, &formulary, &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::AllAutobumped);
    assert!(engine.calls.is_empty());
}

#[test]
fn nothing_resolved_without_filtering_is_usage_error() {
    let formulary = sample();
    let flags = SelectionFlags {
        tap: Some("acme/empty".to_owned()),
        ..SelectionFlags::default()
    };
    let mut engine = RecordingEngine::default();

    let err = run(&no_watchlist(), &flags, &formulary, &mut engine).unwrap_err();

    assert!(matches!(
        err,
        LivecheckError::Usage(UsageError::NothingToCheck)
    ));
    assert!(engine.calls.is_empty());
}

#[test]
fn empty_watchlist_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist");
    std::fs::write(&path, "# nothing yet\n").unwrap();

    let formulary = sample();
    let mut engine = RecordingEngine::default();
    let ctx = RunContext::new(&path, false, false);
    let err = run(&ctx, &SelectionFlags::default(), &formulary, &mut engine).unwrap_err();
    assert!(matches!(
        err,
        LivecheckError::Usage(UsageError::NothingToCheck)
    ));
}

#[test]
fn engine_is_called_once_with_sorted_candidates_and_options() {
    let formulary = sample();
    let flags = SelectionFlags {
        tap: Some("acme/tools".to_owned()),
        cask: true,
        json: true,
        newer_only: true,
        ..SelectionFlags::default()
    };
    let mut engine = RecordingEngine::default();

    let outcome = run(&no_watchlist(), &flags, &formulary, &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::Checked { count: 3 });
    assert_eq!(engine.calls.len(), 1);
    let (candidates, options) = &engine.calls[0];
    assert_eq!(ids(candidates), vec!["beacon", "dock", "widget"]);

    let json = serde_json::to_value(options).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "json": true,
            "handle_name_conflict": false,
            "newer_only": true,
        })
    );
}

#[test]
fn watchlist_path_is_not_consulted_when_a_mode_is_given() {
    let formulary = sample();
    let flags = SelectionFlags {
        named: vec!["curl".to_owned()],
        ..SelectionFlags::default()
    };
    let ctx = RunContext::new(Path::new("/definitely/not/here"), false, false);
    let selection = select(&ctx, &flags, &formulary).unwrap();
    assert_eq!(ids(&selection.candidates), vec!["curl"]);
}
