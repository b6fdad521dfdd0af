//! 사람이 읽는 수치 문자열 정규화.
//!
//! OCR로 읽은 수입 표기("10k", "5.5M", "0.7b")를 실수 값으로 변환한다.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BotError;

/// `<숫자>[.<숫자>][접미사]` 전체 일치 패턴. 접미사는 k/m/b/t만 허용.
static HUMAN_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)([kmbt])?$").expect("수치 정규식 컴파일 실패"));

/// 수치 문자열을 실제 값으로 변환한다.
///
/// - 앞뒤 공백 무시, 접미사 대소문자 무시
/// - `k`=1e3, `m`=1e6 배율 적용
/// - `b`/`t`는 예약 접미사 — 패턴은 허용하되 배율 1로 취급한다
///   (스캔 통합은 k/m만 의존하며, 매핑되지 않은 예약 접미사를
///   하드 실패로 만들면 OCR 오독 한 글자에 틱 전체가 죽는다)
/// - 그 외 형식은 전부 [`BotError::InvalidFormat`] (부분 일치 없음)
pub fn human_readable_to_long(input: &str) -> Result<f64, BotError> {
    let s = input.trim().to_lowercase();

    let caps = HUMAN_NUM_RE
        .captures(&s)
        .ok_or_else(|| BotError::InvalidFormat(input.to_string()))?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| BotError::InvalidFormat(input.to_string()))?;

    let scale = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        // 예약 접미사 (현재 스캔 대상 수치 범위 밖)
        Some(_) => 1.0,
        None => 1.0,
    };

    Ok(value * scale)
}
