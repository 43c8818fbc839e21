//! 옵션 빌더 -- 플래그를 희소 [`CheckOptions`]로 변환합니다.

use livecheck_core::options::CheckOptions;

use crate::flags::SelectionFlags;

/// 플래그에서 엔진 옵션을 만듭니다.
///
/// 켜진 플래그만 `Some(true)`가 되고 나머지는 `None`(엔진 기본값)입니다.
/// `handle_name_conflict`는 직접 플래그가 아니라 종류 제한에서 파생되므로
/// 항상 명시적인 값(`Some(true)` 또는 `Some(false)`)을 가집니다.
pub fn build_options(flags: &SelectionFlags) -> CheckOptions {
    let set = |on: bool| on.then_some(true);

    CheckOptions {
        json: set(flags.json),
        full_name: set(flags.full_name),
        handle_name_conflict: Some(!flags.kind_filter().is_restricted()),
        check_resources: set(flags.resources),
        newer_only: set(flags.newer_only),
        extract_plist: set(flags.extract_plist),
        quiet: set(flags.quiet),
        debug: set(flags.debug),
        verbose: set(flags.verbose),
    }
}
