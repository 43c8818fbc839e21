//! watchlist 리더 -- 한 줄에 식별자 하나인 텍스트 파일
//!
//! `#`로 시작하는 줄과 공백뿐인 줄은 무시하고, 나머지는 앞뒤 공백을
//! 제거한 뒤 원래 순서대로 반환합니다.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::WatchlistError;

/// watchlist 내용을 식별자 목록으로 정규화합니다.
pub fn parse_watchlist(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(identifier)
        .map(str::to_owned)
        .collect()
}

/// 주석이나 빈 줄이면 `None`, 아니면 앞뒤 공백을 제거한 식별자
fn identifier(line: &str) -> Option<&str> {
    let line = line.trim();
    (!line.is_empty() && !line.starts_with('#')).then_some(line)
}

/// watchlist 파일을 읽어 식별자 목록을 반환합니다.
///
/// 파일 핸들은 함수가 어떤 경로로 반환하든 drop으로 해제됩니다.
///
/// # Errors
///
/// - 파일이 없으면 `WatchlistError::NotFound`
/// - 그 밖의 읽기 실패는 `WatchlistError::Read`
pub fn read_watchlist(path: &Path) -> Result<Vec<String>, WatchlistError> {
    let file = File::open(path).map_err(|e| WatchlistError::from_io(path, e))?;
    let reader = BufReader::new(file);

    let mut identifiers = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| WatchlistError::from_io(path, e))?;
        if let Some(id) = identifier(&line) {
            identifiers.push(id.to_owned());
        }
    }

    tracing::debug!(
        path = %path.display(),
        count = identifiers.len(),
        "read watchlist"
    );

    Ok(identifiers)
}
