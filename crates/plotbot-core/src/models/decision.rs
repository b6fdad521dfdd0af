//! 판정 결과 모델.
//!
//! 틱마다 새로 만들어지고 저장되지 않는다.

use serde::{Deserialize, Serialize};

/// 수락 필터 설정
///
/// 수입/등급 중 하나라도 통과하면 수락 (OR 결합).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// 최소 수입 (None이면 수입 조건 비활성)
    pub min_income: Option<f64>,
    /// 최소 등급 라벨 (None/"N/A"/빈 문자열이면 모든 등급 수락)
    pub min_rarity: Option<String>,
}

impl FilterConfig {
    /// 등급 필터가 실질적으로 설정되어 있는지
    pub fn has_rarity_filter(&self) -> bool {
        match &self.min_rarity {
            Some(r) => !r.trim().is_empty() && !r.trim().eq_ignore_ascii_case("n/a"),
            None => false,
        }
    }
}

/// 한 틱의 분류 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    /// 탐지된 수입 (정규화된 값)
    pub income: Option<f64>,
    /// 수입 원문 (툴팁 표시용, 예: "1.5k")
    pub income_text: Option<String>,
    /// 탐지된 등급 인덱스 (사다리 기준)
    pub rarity_tier: Option<usize>,
    /// 탐지된 등급 라벨
    pub rarity_label: Option<String>,
    /// 수락 여부
    pub accepted: bool,
    /// 사람이 읽는 판정 사유
    pub reason: String,
}
