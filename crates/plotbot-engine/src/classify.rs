//! 틱 분류 + 수락 판정.
//!
//! 스캔 샘플 하나를 수입/등급 탐지 결과로 바꾸고,
//! 필터와 오탐 억제 규칙을 적용해 수락 여부를 정한다.
//! 전부 순수 함수 — 센서/액추에이터/버스에 의존하지 않는다.

use once_cell::sync::Lazy;
use regex::Regex;

use plotbot_core::config::SuppressionRule;
use plotbot_core::humanize::human_readable_to_long;
use plotbot_core::models::decision::DecisionResult;
use plotbot_core::models::rarity::RarityLadder;
use plotbot_core::models::scan::ScanSample;

/// 수입 표기 패턴: `$<값>/s`
static INCOME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(.+)/s").expect("수입 정규식 컴파일 실패"));

/// 한 틱의 원시 탐지 결과
#[derive(Debug, Clone, Default)]
pub struct TickReading {
    /// 탐지된 수입 (마지막 매치 우선)
    pub income: Option<f64>,
    /// 수입 원문 (예: "1.5k")
    pub income_text: Option<String>,
    /// 탐지된 등급 인덱스 (발견된 것 중 최고 등급)
    pub rarity_tier: Option<usize>,
    /// 정규화에 실패한 수입 문자열 (틱당 로그용)
    pub parse_failures: Vec<String>,
}

/// 샘플에서 수입과 등급을 읽는다.
///
/// 수입 스캔은 토큰 단위(`$<값>/s` 패턴, 마지막 매치 우선),
/// 등급 스캔은 영역 전체 키워드 검색으로 서로 독립적이다 —
/// 한 틱이 둘 다 탐지할 의무는 없다.
pub fn read_tick(sample: &ScanSample, ladder: &RarityLadder) -> TickReading {
    let mut reading = TickReading::default();

    for word in sample.words() {
        if let Some(caps) = INCOME_RE.captures(&word.text) {
            let raw = caps[1].to_string();
            match human_readable_to_long(&raw) {
                Ok(value) => {
                    reading.income = Some(value);
                    reading.income_text = Some(raw);
                }
                Err(_) => reading.parse_failures.push(raw),
            }
        }
    }

    reading.rarity_tier = ladder.highest_in_sample(sample);
    reading
}

/// 필터 + 억제 규칙을 적용해 수락 여부를 판정한다.
///
/// - `min_income`: `None`이면 수입 조건 비활성
/// - `min_tier`: `None`이면 등급 무관 수락("accept any") — 이 경우
///   등급 탐지만으로는 수락되지 않는다
pub fn decide(
    reading: &TickReading,
    min_income: Option<f64>,
    min_tier: Option<usize>,
    ladder: &RarityLadder,
    rules: &[SuppressionRule],
) -> DecisionResult {
    let rarity_label = reading
        .rarity_tier
        .and_then(|t| ladder.label(t))
        .map(|s| s.to_string());

    let mut income_ok = match (reading.income, min_income) {
        (Some(income), Some(min)) => income >= min,
        _ => false,
    };
    let mut rarity_ok = match (reading.rarity_tier, min_tier) {
        (Some(tier), Some(min)) => ladder.is_at_least(tier, min),
        _ => false,
    };

    // 오탐 억제: 낮은 등급 라벨과 비정상적으로 큰 수입의 짝은 오독으로 취급
    let mut suppressed = false;
    if let (Some(income), Some(label)) = (reading.income, rarity_label.as_deref()) {
        for rule in rules {
            if income > rule.income_ceiling && rule.rarities.iter().any(|r| r == label) {
                income_ok = false;
                rarity_ok = false;
                suppressed = true;
                break;
            }
        }
    }

    let accepted = income_ok || rarity_ok;
    let reason = if suppressed {
        format!(
            "오탐 억제: 등급 '{}'에 수입 {:.0}은 비현실적",
            rarity_label.as_deref().unwrap_or("?"),
            reading.income.unwrap_or(0.0)
        )
    } else if accepted {
        format!(
            "수락 (수입 조건: {income_ok}, 등급 조건: {rarity_ok})"
        )
    } else {
        format!(
            "거부 (수입: {:?}, 등급: {:?})",
            reading.income, rarity_label
        )
    };

    DecisionResult {
        income: reading.income,
        income_text: reading.income_text.clone(),
        rarity_tier: reading.rarity_tier,
        rarity_label,
        accepted,
        reason,
    }
}
