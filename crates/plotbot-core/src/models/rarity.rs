//! 등급 사다리.
//!
//! 탐지 라벨이자 필터 임계값으로 쓰이는 순서 있는 분류 체계.
//! 라벨 집합은 설정에서 오고, 중요한 불변식은 순서뿐이다:
//! "최소 등급" 필터링은 순서상 뒤쪽 구간(suffix) 검사다.

use serde::{Deserialize, Serialize};

use super::scan::ScanSample;

/// 기본 등급 라벨 (낮은 것부터)
pub const DEFAULT_RARITY_LABELS: [&str; 7] = [
    "common",
    "rare",
    "epic",
    "legendary",
    "mythic",
    "brainrot",
    "secret",
];

/// 순서 있는 등급 라벨 목록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityLadder {
    labels: Vec<String>,
}

impl Default for RarityLadder {
    fn default() -> Self {
        Self {
            labels: DEFAULT_RARITY_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RarityLadder {
    /// 커스텀 라벨 목록으로 사다리 생성 (낮은 등급부터)
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels: labels.into_iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    /// 라벨 목록 (낮은 등급부터)
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// 라벨을 등급 인덱스로 해석한다 (대소문자 무시, 꼬리 " god" 수식어 제거).
    /// 목록에 없는 라벨은 `None`.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        let mut normalized = name.trim().to_lowercase();
        if let Some(stripped) = normalized.strip_suffix(" god") {
            normalized = stripped.to_string();
        }
        self.labels.iter().position(|l| *l == normalized)
    }

    /// 인덱스에 해당하는 라벨
    pub fn label(&self, tier: usize) -> Option<&str> {
        self.labels.get(tier).map(|s| s.as_str())
    }

    /// `tier`가 `min_tier` 이상인지 (suffix-of-the-ordering 검사)
    pub fn is_at_least(&self, tier: usize, min_tier: usize) -> bool {
        tier >= min_tier
    }

    /// `min_tier` 이상의 라벨 목록 (로그 표시용)
    pub fn accepted_from(&self, min_tier: usize) -> &[String] {
        &self.labels[min_tier.min(self.labels.len())..]
    }

    /// 샘플에서 발견된 가장 높은 등급 키워드의 인덱스
    ///
    /// 위에서부터 검사하므로 낮은 등급 키워드가 함께 보여도
    /// 가장 높은 것이 선택된다.
    pub fn highest_in_sample(&self, sample: &ScanSample) -> Option<usize> {
        (0..self.labels.len())
            .rev()
            .find(|&i| sample.contains_keyword(&self.labels[i]))
    }
}
