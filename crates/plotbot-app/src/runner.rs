//! 감독 루프.
//!
//! 돈 수집과 NPC 스캔을 번갈아 실행한다. 스캔 지속 시간은
//! 돈 수집 주기가 결정한다. 엔진 명령의 실패는 명령 경계에서
//! 잡아 로깅하고 루프를 계속한다 — 재시도 여부는 여기서 정한다.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use plotbot_core::cancel::CancelFlag;
use plotbot_core::config::RunConfig;
use plotbot_core::error::BotError;
use plotbot_core::models::decision::FilterConfig;
use plotbot_engine::action_queue::ActionQueue;
use plotbot_engine::engine::DecisionEngine;
use plotbot_engine::event_bus::{EventBus, TipColor};

/// 선점 후 큐가 빌 때까지 폴링하는 간격
const DRAIN_POLL: Duration = Duration::from_millis(200);

/// 봇 감독 루프
pub struct BotRunner {
    engine: Arc<DecisionEngine>,
    queue: Arc<ActionQueue>,
    bus: Arc<EventBus>,
    cancel: CancelFlag,
    run: RunConfig,
    /// 한 사이클만 돌고 종료 (테스트/`--once`)
    once: bool,
}

impl BotRunner {
    pub fn new(
        engine: Arc<DecisionEngine>,
        queue: Arc<ActionQueue>,
        bus: Arc<EventBus>,
        cancel: CancelFlag,
        run: RunConfig,
        once: bool,
    ) -> Self {
        Self {
            engine,
            queue,
            bus,
            cancel,
            run,
            once,
        }
    }

    /// 메인 루프 — 취소가 관찰될 때까지 반환하지 않는다
    pub async fn run(&self) {
        self.bus.change_status("봇 구성 요소 초기화 중...", TipColor::Gray);

        // 정렬은 세션당 한 번 — 실패해도 이전 방향값으로 계속
        match self.engine.align_camera().await {
            Ok(()) => {}
            Err(BotError::Cancelled) => {
                self.finish();
                return;
            }
            Err(e) => warn!(cause = %e, "카메라 정렬 실패 — 이전 방향값 유지"),
        }

        let filter = FilterConfig {
            min_income: Some(self.run.income_threshold),
            min_rarity: Some(self.run.min_rarity.clone()),
        };
        self.bus.change_status("봇 실행 중", TipColor::Green);

        while !self.cancel.is_set() {
            // 1. 돈 수집
            if self.run.auto_collect_money {
                match self.engine.collect_money().await {
                    Ok(()) => {}
                    Err(BotError::Cancelled) => break,
                    Err(e) => warn!(cause = %e, "돈 수집 실패 — 다음 사이클에 재시도"),
                }
            }

            if self.cancel.is_set() {
                break;
            }

            // 2. NPC 스캔 — 수집이 켜져 있으면 수집 주기만큼만
            if self.run.auto_scan_npcs {
                let stop_time = self
                    .run
                    .auto_collect_money
                    .then(|| self.run.collect_money_interval());

                match self.engine.scan_npcs(&filter, stop_time).await {
                    Ok(()) => {}
                    Err(BotError::Cancelled) => break,
                    Err(BotError::Preempted) => {
                        info!("스캔 선점됨 — 대기 명령 소진까지 대기");
                        self.drain_queue().await;
                    }
                    Err(e) => {
                        warn!(cause = %e, "스캔 실패 — 잠시 후 재시도");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }

            // 아무 동작도 켜져 있지 않으면 바쁜 루프 방지
            if !self.run.auto_collect_money && !self.run.auto_scan_npcs {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            if self.once {
                break;
            }
        }

        self.finish();
    }

    /// 큐에 쌓인 경쟁 명령이 소진될 때까지 대기
    async fn drain_queue(&self) {
        while self.queue.pending_count() > 0 && !self.cancel.is_set() {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    }

    fn finish(&self) {
        self.bus.change_status("봇 동작 종료 또는 중지됨", TipColor::Orange);
    }
}
