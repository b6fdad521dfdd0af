//! # plotbot-app
//!
//! PLOTBOT 바이너리 진입점.
//! DI 컨테이너 역할, 라이프사이클 관리, 감독 루프 기동.

mod lifecycle;
mod runner;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use plotbot_core::cancel::CancelFlag;
use plotbot_core::config_manager::ConfigManager;
use plotbot_core::ports::actuator::Actuator;
use plotbot_core::ports::sensor::Sensor;
use plotbot_engine::action_queue::ActionQueue;
use plotbot_engine::engine::DecisionEngine;
use plotbot_engine::event_bus::{EventBus, Topic};

use crate::lifecycle::LifecycleManager;
use crate::runner::BotRunner;

/// PLOTBOT 클라이언트
///
/// OCR 스캔 기반 플롯 자동화 봇
#[derive(Parser, Debug)]
#[command(name = "plotbot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 드라이런 모드 — 화면을 건드리지 않는 No-Op 어댑터 사용
    #[arg(long)]
    dry_run: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 최소 수입 임계값 재정의
    #[arg(long)]
    min_income: Option<f64>,

    /// 최소 등급 재정의 ("N/A"면 모든 등급 수락)
    #[arg(long)]
    min_rarity: Option<String>,

    /// 스캔 1회 지속 시간 재정의 (초)
    #[arg(long)]
    scan_duration: Option<u64>,

    /// 돈 자동 수집 비활성화
    #[arg(long)]
    no_collect: bool,

    /// 카메라 정렬만 수행하고 종료
    #[arg(long)]
    align_only: bool,

    /// 수집+스캔 한 사이클만 돌고 종료
    #[arg(long)]
    once: bool,
}

/// 센서 어댑터 선택 (ocr feature + 드라이런 여부)
fn make_sensor(dry_run: bool) -> Arc<dyn Sensor> {
    #[cfg(feature = "ocr")]
    {
        if !dry_run {
            return Arc::new(plotbot_vision::ocr::TesseractSensor::new(None));
        }
    }
    if !dry_run {
        warn!("ocr feature 비활성 — No-Op 센서로 대체");
    }
    Arc::new(plotbot_vision::noop::NoOpSensor)
}

/// 액추에이터 어댑터 선택 (enigo feature + 드라이런 여부)
fn make_actuator(dry_run: bool) -> Result<Arc<dyn Actuator>> {
    #[cfg(feature = "enigo")]
    {
        if !dry_run {
            let driver = plotbot_automation::driver::EnigoActuator::new((0, 0))?;
            return Ok(Arc::new(driver));
        }
    }
    if !dry_run {
        warn!("enigo feature 비활성 — No-Op 액추에이터로 대체");
    }
    Ok(Arc::new(plotbot_automation::noop::NoOpActuator))
}

/// 버스 이벤트를 tracing으로 중계하는 기본 관찰자 등록
fn wire_bus_logging(bus: &EventBus) {
    bus.subscribe(Topic::Status, |m| info!(status = %m.text, "상태 변경"));
    bus.subscribe(Topic::Log, |m| info!("{}", m.text));
    bus.subscribe(Topic::Debug, |m| debug!("{}", m.text));
    bus.subscribe(Topic::Success, |m| info!(message = %m.text, "매치 성공"));
    bus.subscribe(Topic::Tooltip, |m| debug!(color = ?m.color, "{}", m.text));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .init();

    // 설정 로드 + CLI 재정의
    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.snapshot();
    if let Some(v) = args.min_income {
        config.run.income_threshold = v;
    }
    if let Some(v) = &args.min_rarity {
        config.run.min_rarity = v.clone();
    }
    if let Some(v) = args.scan_duration {
        config.run.collect_money_interval_secs = v;
    }
    if args.no_collect {
        config.run.auto_collect_money = false;
    }
    info!(config = %config_manager.path().display(), dry_run = args.dry_run, "PLOTBOT 시작");

    // 와이어링
    let bus = Arc::new(EventBus::new());
    wire_bus_logging(&bus);

    let cancel = CancelFlag::new();
    let queue = ActionQueue::start();
    let sensor = make_sensor(args.dry_run);
    let actuator = make_actuator(args.dry_run)?;
    info!(
        sensor = sensor.provider_name(),
        actuator = actuator.platform(),
        "어댑터 와이어링 완료"
    );

    let engine = Arc::new(DecisionEngine::new(
        sensor,
        actuator,
        Arc::clone(&bus),
        Arc::clone(&queue),
        cancel.clone(),
        config.engine.clone(),
    ));

    // 시그널 → 취소 플래그
    let lifecycle = LifecycleManager::new(cancel.clone());
    tokio::spawn(async move { lifecycle.wait_for_signal().await });

    if args.align_only {
        engine.align_camera().await?;
        info!(side = ?engine.plot_side(), "정렬 완료 — 종료");
        return Ok(());
    }

    let runner = BotRunner::new(
        Arc::clone(&engine),
        queue,
        bus,
        cancel,
        config.run.clone(),
        args.once,
    );
    runner.run().await;

    info!("PLOTBOT 종료");
    Ok(())
}
