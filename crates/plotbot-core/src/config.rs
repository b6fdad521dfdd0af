//! 애플리케이션 설정 구조체.
//!
//! 실행 플래그, 수락 필터 기본값, 엔진 타이밍/영역/억제 규칙 등
//! 런타임 설정을 정의한다. JSON 파일로 저장/로드된다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::geometry::{Point, Region};
use crate::models::rarity::DEFAULT_RARITY_LABELS;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 감독 루프 설정
    pub run: RunConfig,
    /// 판정 엔진 설정
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            run: RunConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 감독 루프 설정
// ============================================================

/// 감독 루프 설정 — 어떤 자동화를 돌릴지와 기본 필터값
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// 돈 자동 수집 활성화
    pub auto_collect_money: bool,
    /// 돈 수집 주기 (초) — 스캔의 stop_time으로도 쓰인다
    pub collect_money_interval_secs: u64,
    /// NPC 자동 스캔 활성화
    pub auto_scan_npcs: bool,
    /// 최소 수입 임계값
    pub income_threshold: f64,
    /// 최소 등급 라벨 ("N/A"면 모든 등급 수락)
    pub min_rarity: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            auto_collect_money: true,
            collect_money_interval_secs: 300,
            auto_scan_npcs: true,
            income_threshold: 1000.0,
            min_rarity: "Rare".to_string(),
        }
    }
}

impl RunConfig {
    /// 돈 수집 주기
    pub fn collect_money_interval(&self) -> Duration {
        Duration::from_secs(self.collect_money_interval_secs)
    }
}

// ============================================================
// 판정 엔진 설정
// ============================================================

/// 오탐 억제 규칙
///
/// 지정 등급 집합과 함께 탐지된 수입이 상한을 넘으면
/// 그 틱의 수입/등급 판정을 모두 무효화한다.
/// OCR 노이즈가 낮은 등급 라벨과 터무니없이 큰 수입을
/// 짝지어 내놓는 경우를 걸러낸다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionRule {
    /// 규칙이 적용되는 등급 라벨 (소문자)
    pub rarities: Vec<String>,
    /// 수입 상한 — 초과 시 오독으로 간주
    pub income_ceiling: f64,
}

/// 판정 엔진 설정 — 스캔 영역, 타이밍, 등급 사다리, 억제 규칙
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// NPC 정보가 표시되는 스캔 영역
    pub scan_region: Region,
    /// 카메라 정렬 시 기준 키워드를 찾는 영역
    pub align_region: Region,
    /// 표준화된 대상 서피스 크기 (너비)
    pub surface_width: i32,
    /// 표준화된 대상 서피스 크기 (높이)
    pub surface_height: i32,
    /// 스캔 틱 간격 (ms)
    pub tick_interval_ms: u64,
    /// 유휴 방지 포인터 클릭 주기 (초)
    pub idle_nudge_interval_secs: u64,
    /// 리셋 후 리스폰 대기 (ms)
    pub respawn_wait_ms: u64,
    /// 카메라 정렬 OCR 재시도 횟수
    pub align_attempts: u32,
    /// 정렬 재시도 간격 (ms)
    pub align_retry_delay_ms: u64,
    /// 등급 라벨 목록 (낮은 등급부터)
    pub rarity_labels: Vec<String>,
    /// 오탐 억제 규칙
    pub suppression: Vec<SuppressionRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_region: Region::new(148, 95, 610, 514),
            align_region: Region::new(55, 188, 731, 380),
            surface_width: 800,
            surface_height: 600,
            tick_interval_ms: 200,
            idle_nudge_interval_secs: 60,
            respawn_wait_ms: 5_000,
            align_attempts: 5,
            align_retry_delay_ms: 100,
            rarity_labels: DEFAULT_RARITY_LABELS.iter().map(|s| s.to_string()).collect(),
            suppression: vec![
                SuppressionRule {
                    rarities: vec!["common".into(), "rare".into(), "epic".into()],
                    income_ceiling: 1_000.0,
                },
                SuppressionRule {
                    rarities: vec!["legendary".into()],
                    income_ceiling: 10_000.0,
                },
            ],
        }
    }
}

impl EngineConfig {
    /// 스캔 틱 간격
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// 유휴 방지 클릭 주기
    pub fn idle_nudge_interval(&self) -> Duration {
        Duration::from_secs(self.idle_nudge_interval_secs)
    }

    /// 리스폰 대기 시간
    pub fn respawn_wait(&self) -> Duration {
        Duration::from_millis(self.respawn_wait_ms)
    }

    /// 정렬 재시도 간격
    pub fn align_retry_delay(&self) -> Duration {
        Duration::from_millis(self.align_retry_delay_ms)
    }

    /// 서피스 중심 좌표
    pub fn surface_center(&self) -> Point {
        Point::new(self.surface_width / 2, self.surface_height / 2)
    }
}
