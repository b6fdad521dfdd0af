//! 스캔/판정 엔진.
//!
//! `Idle → Resetting → Aligning → {Collecting | Scanning} → Idle` 상태
//! 기계. 취소 신호가 관찰되면 어느 상태에서든 `Stopped`로 종료하며,
//! 새 시작 명령으로 재장전될 때까지 터미널 상태다.
//!
//! 모든 고정 딜레이는 [`safe_sleep`](DecisionEngine::safe_sleep)을
//! 거치는 협력적 중단 지점이다 — 중단 불가능한 딜레이는 없다.

use std::time::Duration;

use parking_lot::RwLock;
use rand::RngExt;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use plotbot_core::cancel::CancelFlag;
use plotbot_core::config::EngineConfig;
use plotbot_core::error::BotError;
use plotbot_core::models::decision::FilterConfig;
use plotbot_core::models::input::MouseButton;
use plotbot_core::models::rarity::RarityLadder;
use plotbot_core::ports::actuator::Actuator;
use plotbot_core::ports::sensor::Sensor;

use crate::action_queue::ActionQueue;
use crate::classify::{decide, read_tick};
use crate::event_bus::{EventBus, TipColor};

/// 플롯이 화면의 어느 쪽에 있는지 (카메라 정렬이 한 번 기록)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotSide {
    Left,
    Right,
}

/// 엔진 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Resetting,
    Aligning,
    Collecting,
    Scanning,
    /// 취소 관찰 후 터미널 상태 — [`DecisionEngine::rearm`]으로 재장전
    Stopped,
}

/// 고수준 명령 — 감독 호출자/큐 통합용 단일 진입점
#[derive(Debug, Clone)]
pub enum Command {
    Reset { no_drag: bool },
    AlignCamera,
    CollectMoney,
    LockBase,
    Scan {
        filter: FilterConfig,
        stop_time: Option<Duration>,
    },
}

// 스크립트 고정 타이밍 (원 게임의 메뉴/이동 애니메이션에 맞춘 값)
const MENU_STEP_DELAY: Duration = Duration::from_millis(300);
const POST_DRAG_DELAY: Duration = Duration::from_millis(500);
const CAMERA_DRAG: (i32, i32, i32, i32) = (100, 100, 100, 500);
const COLLECT_FIRST_TO_LAST: Duration = Duration::from_millis(1000);
const LOCK_HOLD: Duration = Duration::from_millis(1800);
const SCAN_POSITION_HOLD: Duration = Duration::from_millis(1700);
const CONFIRM_HOLD: Duration = Duration::from_millis(500);
/// 유휴 방지 클릭 좌표 (y 고정, x는 12~13 사이 무작위)
const NUDGE_Y: i32 = 65;

/// 판정·실행 상태 기계
///
/// 센서/액추에이터/버스/큐는 전부 주입된다 — 전역 상태 없음.
pub struct DecisionEngine {
    sensor: Arc<dyn Sensor>,
    actuator: Arc<dyn Actuator>,
    bus: Arc<EventBus>,
    queue: Arc<ActionQueue>,
    cancel: CancelFlag,
    config: EngineConfig,
    ladder: RarityLadder,
    /// 카메라 정렬이 한 번 쓰고 나머지 명령이 읽는 방향 플래그
    plot_side: RwLock<Option<PlotSide>>,
    state: RwLock<EngineState>,
}

impl DecisionEngine {
    /// 새 엔진 생성
    pub fn new(
        sensor: Arc<dyn Sensor>,
        actuator: Arc<dyn Actuator>,
        bus: Arc<EventBus>,
        queue: Arc<ActionQueue>,
        cancel: CancelFlag,
        config: EngineConfig,
    ) -> Self {
        let ladder = RarityLadder::new(config.rarity_labels.clone());
        Self {
            sensor,
            actuator,
            bus,
            queue,
            cancel,
            config,
            ladder,
            plot_side: RwLock::new(None),
            state: RwLock::new(EngineState::Idle),
        }
    }

    /// 현재 상태
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    /// 현재 방향 플래그 (정렬 전이면 None)
    pub fn plot_side(&self) -> Option<PlotSide> {
        *self.plot_side.read()
    }

    /// `Stopped` 상태에서 재장전 — 취소 플래그 해제 + Idle 복귀
    pub fn rearm(&self) {
        self.cancel.clear();
        *self.state.write() = EngineState::Idle;
        debug!("엔진 재장전");
    }

    fn set_state(&self, next: EngineState) {
        *self.state.write() = next;
    }

    /// 명령 디스패치 진입점 — 완료/취소/선점 시에만 반환
    pub async fn run_command(&self, command: Command) -> Result<(), BotError> {
        match command {
            Command::Reset { no_drag } => self.reset(no_drag).await,
            Command::AlignCamera => self.align_camera().await,
            Command::CollectMoney => self.collect_money().await,
            Command::LockBase => self.lock_base().await,
            Command::Scan { filter, stop_time } => self.scan_npcs(&filter, stop_time).await,
        }
    }

    // ── 취소 체크포인트 ──

    fn check_cancel(&self) -> Result<(), BotError> {
        if self.cancel.is_set() {
            self.set_state(EngineState::Stopped);
            return Err(BotError::Cancelled);
        }
        Ok(())
    }

    /// 취소 확인 → 대기 → 취소 확인.
    /// 슬립 도중 도착한 취소도 깨어난 직후 잡힌다.
    async fn safe_sleep(&self, duration: Duration) -> Result<(), BotError> {
        self.check_cancel()?;
        tokio::time::sleep(duration).await;
        self.check_cancel()
    }

    fn side_is_right(&self) -> bool {
        matches!(*self.plot_side.read(), Some(PlotSide::Right))
    }

    // ── 고수준 명령 ──

    /// 캐릭터 리셋 — 메뉴 해제, 리스폰 확인, 대기, (선택) 카메라 드래그
    pub async fn reset(&self, no_drag: bool) -> Result<(), BotError> {
        self.set_state(EngineState::Resetting);
        self.bus.change_status("캐릭터 리셋 중...", TipColor::Gray);

        self.actuator.key_press("esc", Duration::ZERO).await?;
        self.safe_sleep(MENU_STEP_DELAY).await?;
        self.actuator.key_press("r", Duration::ZERO).await?;
        self.safe_sleep(MENU_STEP_DELAY).await?;
        self.actuator.key_press("enter", Duration::ZERO).await?;
        self.safe_sleep(self.config.respawn_wait()).await?;

        if !no_drag {
            let (x0, y0, x1, y1) = CAMERA_DRAG;
            self.actuator.drag(x0, y0, x1, y1, MouseButton::Right).await?;
        }
        self.safe_sleep(POST_DRAG_DELAY).await?;

        self.set_state(EngineState::Idle);
        Ok(())
    }

    /// 카메라 정렬 — 시점 재배치 후 OCR로 플롯 방향을 기록
    ///
    /// 모든 시도가 실패하면 방향 플래그는 이전 값을 유지한다
    /// (세션당 한 번 수행되고, 이후 명령은 미설정 방향을 견딘다).
    pub async fn align_camera(&self) -> Result<(), BotError> {
        self.set_state(EngineState::Aligning);
        let center = self.config.surface_center();

        self.actuator.click(center.x, center.y, MouseButton::Left).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;
        self.bus.change_status("카메라 정렬 중...", TipColor::Gray);

        // 최대 줌인 후 고정 단계만큼 줌아웃해 시점을 표준화한다
        self.actuator.scroll(1000).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;
        self.actuator.scroll(-9).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;

        self.reset(true).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;

        // 기준 키워드("cash"/"collect")의 x 좌표로 좌/우 판별
        for attempt in 0..self.config.align_attempts {
            let sample = self.sensor.read_region(self.config.align_region).await?;
            self.bus.debug(format!("정렬 OCR: 토큰 {}개", sample.words().len()));

            let token = sample
                .find_token_containing("cash")
                .or_else(|| sample.find_token_containing("collect"));

            if let Some(word) = token {
                let side = if word.center.x > center.x {
                    PlotSide::Right
                } else {
                    PlotSide::Left
                };
                *self.plot_side.write() = Some(side);
                self.bus.debug(format!("기준 키워드 x={} → 플롯 {:?}", word.center.x, side));
                info!(?side, attempt, "카메라 정렬 완료");
                break;
            }

            self.bus.debug("기준 키워드 미발견 — 재시도".to_string());
            self.safe_sleep(self.config.align_retry_delay()).await?;
        }

        let (x0, y0, x1, y1) = CAMERA_DRAG;
        self.actuator.drag(x0, y0, x1, y1, MouseButton::Right).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;

        self.set_state(EngineState::Idle);
        Ok(())
    }

    /// 돈 수집 — 방향 플래그로 매개변수화된 고정 타이밍 이동 스크립트
    pub async fn collect_money(&self) -> Result<(), BotError> {
        self.reset(false).await?;
        self.set_state(EngineState::Collecting);
        self.bus.change_status("돈 수집 중...", TipColor::Gray);

        let (toward, away) = if self.side_is_right() {
            ("d", "a")
        } else {
            ("a", "d")
        };

        self.actuator.key_press(toward, Duration::from_millis(550)).await?;
        self.safe_sleep(Duration::from_millis(500)).await?;
        self.actuator.key_press("w", Duration::from_millis(400)).await?;
        self.safe_sleep(Duration::from_millis(400)).await?;
        self.actuator.key_press(toward, COLLECT_FIRST_TO_LAST).await?;
        self.safe_sleep(Duration::from_millis(500)).await?;
        self.actuator.key_press("s", Duration::from_millis(700)).await?;
        self.safe_sleep(Duration::from_millis(500)).await?;
        self.actuator.key_press(away, COLLECT_FIRST_TO_LAST).await?;
        self.safe_sleep(Duration::from_millis(500)).await?;

        self.set_state(EngineState::Idle);
        Ok(())
    }

    /// 베이스 잠금 — 플롯 쪽으로 길게 이동
    pub async fn lock_base(&self) -> Result<(), BotError> {
        self.reset(false).await?;
        self.set_state(EngineState::Collecting);
        self.bus.change_status("베이스 잠금 중...", TipColor::Gray);

        let key = if self.side_is_right() { "d" } else { "a" };
        self.actuator.key_press(key, LOCK_HOLD).await?;

        self.set_state(EngineState::Idle);
        Ok(())
    }

    /// NPC 스캔 — 핵심 판정 루프
    ///
    /// `stop_time` 경과, 취소([`BotError::Cancelled`]), 또는 큐에
    /// 경쟁 명령이 쌓인 경우([`BotError::Preempted`])에만 반환한다.
    pub async fn scan_npcs(
        &self,
        filter: &FilterConfig,
        stop_time: Option<Duration>,
    ) -> Result<(), BotError> {
        // 1. 최소 등급 해석 — 해석 불가 라벨은 경고 후 "모든 등급 수락"으로 완화
        let min_tier = if filter.has_rarity_filter() {
            let raw = filter.min_rarity.as_deref().unwrap_or_default();
            match self.ladder.resolve(raw) {
                Some(tier) => {
                    self.bus.debug(format!(
                        "스캔 대상 등급: {}",
                        self.ladder.accepted_from(tier).join(", ")
                    ));
                    Some(tier)
                }
                None => {
                    warn!(min_rarity = raw, "알 수 없는 최소 등급 — 모든 등급 수락으로 완화");
                    self.bus.debug(format!(
                        "경고: 최소 등급 '{raw}'이 유효하지 않음. 모든 등급을 수락합니다."
                    ));
                    None
                }
            }
        } else {
            None
        };

        let start = Instant::now();

        // 2. 리셋 + 스캔 위치로 이동 (플롯 반대쪽)
        self.reset(false).await?;
        self.set_state(EngineState::Scanning);
        self.bus.change_status("NPC 스캔 중...", TipColor::Gray);

        let away = if self.side_is_right() { "a" } else { "d" };
        self.actuator.key_press(away, SCAN_POSITION_HOLD).await?;
        self.actuator.mouse_move(13, NUDGE_Y).await?;
        self.safe_sleep(POST_DRAG_DELAY).await?;

        let mut last_nudge = Instant::now();

        // 3. 틱 루프
        loop {
            // 유휴 방지 클릭 — 스캔 결과와 무관하게 고정 주기로 발사
            if last_nudge.elapsed() >= self.config.idle_nudge_interval() {
                let x = rand::rng().random_range(12..=13);
                self.actuator.click(x, NUDGE_Y, MouseButton::Left).await?;
                last_nudge = Instant::now();
            }

            if let Some(limit) = stop_time {
                if start.elapsed() >= limit {
                    self.bus.debug(format!("{}초 경과 — 스캔 종료", limit.as_secs()));
                    break;
                }
            }

            let sample = self.sensor.read_region(self.config.scan_region).await?;

            let reading = read_tick(&sample, &self.ladder);
            for bad in &reading.parse_failures {
                self.bus.debug(format!("수입 문자열 정규화 실패: '{bad}'"));
            }

            let result = decide(
                &reading,
                filter.min_income,
                min_tier,
                &self.ladder,
                &self.config.suppression,
            );

            let rarity_display = result.rarity_label.as_deref().unwrap_or("???");
            let income_display = result
                .income_text
                .as_deref()
                .map(|t| format!("${t}/s"))
                .unwrap_or_else(|| "???".to_string());

            // 등급 미해석 보고는 수락 여부와 무관하게 먼저 나간다
            if result.rarity_label.is_none() && !sample.is_empty() {
                self.bus.debug(format!(
                    "미해석 샘플: {:?}",
                    sample.words().iter().map(|w| &w.text).collect::<Vec<_>>()
                ));
            }

            if result.accepted {
                self.bus.tooltip(
                    format!("발견!\n등급: {rarity_display}\n수입: {income_display}"),
                    TipColor::Green,
                );
                self.bus.success(format!(
                    "매치 발견! 등급: {rarity_display}, 수입: {:?}",
                    result.income
                ));
                self.actuator.key_press("e", CONFIRM_HOLD).await?;
            } else {
                self.bus.tooltip(
                    format!("등급: {rarity_display}\n수입: {income_display}"),
                    TipColor::Red,
                );
                if result.rarity_label.is_some() && !sample.is_empty() {
                    self.bus.debug(format!("건너뜀. {}", result.reason));
                }
            }

            // 스캔 중 경쟁 명령이 큐에 쌓였으면 즉시 양보
            if self.queue.pending_count() > 0 {
                info!(pending = self.queue.pending_count(), "대기 명령 감지 — 스캔 선점");
                self.set_state(EngineState::Idle);
                return Err(BotError::Preempted);
            }

            self.safe_sleep(self.config.tick_interval()).await?;
        }

        self.set_state(EngineState::Idle);
        Ok(())
    }
}
