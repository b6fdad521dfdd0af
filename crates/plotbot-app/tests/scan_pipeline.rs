//! 스캔 파이프라인 통합 테스트.
//!
//! 대본 센서 + 기록 액추에이터로 엔진 명령을 끝까지 돌린다.
//! 시계는 `start_paused`로 가상화 — 고정 딜레이가 즉시 경과한다.

mod support;

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use assert_matches::assert_matches;

use plotbot_core::cancel::CancelFlag;
use plotbot_core::config::EngineConfig;
use plotbot_core::error::BotError;
use plotbot_core::models::decision::FilterConfig;
use plotbot_core::models::geometry::Point;
use plotbot_core::models::scan::{ScanSample, ScanWord};
use plotbot_engine::action_queue::{Action, ActionQueue};
use plotbot_engine::engine::{Command, DecisionEngine, EngineState, PlotSide};
use plotbot_engine::event_bus::{EventBus, TipColor, Topic};

use support::{sample, Call, RecordingActuator, ScriptedSensor};

fn make_engine(
    sensor: Arc<ScriptedSensor>,
    actuator: Arc<RecordingActuator>,
    cancel: CancelFlag,
) -> (Arc<DecisionEngine>, Arc<EventBus>, Arc<ActionQueue>) {
    let bus = Arc::new(EventBus::new());
    let queue = ActionQueue::start();
    let engine = Arc::new(DecisionEngine::new(
        sensor,
        actuator,
        Arc::clone(&bus),
        Arc::clone(&queue),
        cancel,
        EngineConfig::default(),
    ));
    (engine, bus, queue)
}

fn filter(min_income: Option<f64>, min_rarity: Option<&str>) -> FilterConfig {
    FilterConfig {
        min_income,
        min_rarity: min_rarity.map(|s| s.to_string()),
    }
}

#[tokio::test(start_paused = true)]
async fn income_above_threshold_is_accepted() {
    // "$1.5k/s" (1500) + 등급 필터 없음 → 수락, 확인 키 'e' 발사
    let sensor = ScriptedSensor::new(vec![sample(&["$1.5k/s"])]);
    let actuator = RecordingActuator::new();
    let (engine, bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let successes = Arc::new(StdMutex::new(Vec::new()));
    let s = Arc::clone(&successes);
    bus.subscribe(Topic::Success, move |m| s.lock().unwrap().push(m.text.clone()));

    engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 1, "확인 키가 정확히 한 번 눌려야 함");
    assert_eq!(successes.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn income_below_threshold_is_rejected() {
    let sensor = ScriptedSensor::new(vec![sample(&["$500/s"])]);
    let actuator = RecordingActuator::new();
    let (engine, bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let tooltips = Arc::new(StdMutex::new(Vec::new()));
    let t = Arc::clone(&tooltips);
    bus.subscribe(Topic::Tooltip, move |m| {
        t.lock().unwrap().push((m.text.clone(), m.color));
    });

    engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 0);
    // 거부 틱은 빨간 툴팁으로 보고된다
    assert!(tooltips
        .lock()
        .unwrap()
        .iter()
        .any(|(text, color)| *color == TipColor::Red && text.contains("$500/s")));
}

#[tokio::test(start_paused = true)]
async fn rarity_filter_uses_ladder_ordering() {
    // 최소 등급 Legendary: mythic 수락, epic 거부
    let sensor = ScriptedSensor::new(vec![sample(&["Mythic"]), sample(&["Epic"])]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    engine
        .scan_npcs(&filter(None, Some("Legendary")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 1, "mythic 틱만 수락되어야 함");
}

#[tokio::test(start_paused = true)]
async fn false_positive_pairing_is_suppressed() {
    // 수입 5000 ≥ 임계값 1000이지만 등급 rare와의 짝은 오독으로 거부
    let sensor = ScriptedSensor::new(vec![sample(&["$5k/s", "Rare"])]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    engine
        .scan_npcs(&filter(Some(1000.0), Some("Rare")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 0);
}

#[tokio::test(start_paused = true)]
async fn unknown_min_rarity_degrades_to_accept_any() {
    let sensor = ScriptedSensor::new(vec![sample(&["$2k/s"])]);
    let actuator = RecordingActuator::new();
    let (engine, bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let debugs = Arc::new(StdMutex::new(Vec::new()));
    let d = Arc::clone(&debugs);
    bus.subscribe(Topic::Debug, move |m| d.lock().unwrap().push(m.text.clone()));

    engine
        .scan_npcs(&filter(Some(1000.0), Some("Ultra")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    // 경고가 찍히고, 수입 조건만으로 수락된다
    assert!(debugs
        .lock()
        .unwrap()
        .iter()
        .any(|t| t.contains("유효하지 않음")));
    assert_eq!(actuator.key_count("e"), 1);
}

#[tokio::test(start_paused = true)]
async fn accepted_tick_still_reports_unresolved_rarity() {
    // 수입만으로 수락되더라도 등급 미해석 디버그는 나가야 한다
    let sensor = ScriptedSensor::new(vec![sample(&["$2k/s", "Zebra"])]);
    let actuator = RecordingActuator::new();
    let (engine, bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let debugs = Arc::new(StdMutex::new(Vec::new()));
    let d = Arc::clone(&debugs);
    bus.subscribe(Topic::Debug, move |m| d.lock().unwrap().push(m.text.clone()));

    engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 1);
    assert!(debugs
        .lock()
        .unwrap()
        .iter()
        .any(|t| t.contains("미해석") && t.contains("Zebra")));
}

#[tokio::test(start_paused = true)]
async fn cancellation_mid_reset_stops_the_script() {
    // 'r' 입력 시점에 취소 플래그가 서면, 다음 체크포인트에서 중단되고
    // 이후 액추에이터 호출이 없어야 한다
    let cancel = CancelFlag::new();
    let sensor = ScriptedSensor::new(vec![]);
    let actuator = RecordingActuator::cancelling_on("r", cancel.clone());
    let (engine, _bus, _queue) = make_engine(sensor, Arc::clone(&actuator), cancel);

    let result = engine.reset(false).await;
    assert_matches!(result, Err(BotError::Cancelled));
    assert_eq!(engine.state(), EngineState::Stopped);

    // 재장전하면 취소 플래그가 풀리고 Idle로 돌아온다
    engine.rearm();
    assert_eq!(engine.state(), EngineState::Idle);

    let calls = actuator.snapshot();
    assert_eq!(
        calls,
        vec![
            Call::Key {
                key: "esc".into(),
                hold: Duration::ZERO
            },
            Call::Key {
                key: "r".into(),
                hold: Duration::ZERO
            },
        ],
        "enter 확인과 드래그는 실행되면 안 됨"
    );
}

#[tokio::test(start_paused = true)]
async fn pending_queue_preempts_scan() {
    let sensor = ScriptedSensor::new(vec![sample(&["$1/s"])]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    // 첫 액션이 워커를 점유하는 동안 두 번째가 대기열에 남는다
    let (_hold_tx, hold_rx) = tokio::sync::oneshot::channel::<()>();
    queue
        .submit(Action::new("점유", async move {
            let _ = hold_rx.await;
            Ok(())
        }))
        .unwrap();
    queue.submit(Action::new("대기", async { Ok(()) })).unwrap();

    let result = engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), None)
        .await;
    assert_matches!(result, Err(BotError::Preempted));
}

#[tokio::test(start_paused = true)]
async fn queued_commands_dispatch_through_run_command() {
    // 큐에 제출된 고수준 명령이 run_command로 직렬 실행된다
    let sensor = ScriptedSensor::new(vec![]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    let eng = Arc::clone(&engine);
    queue
        .submit(Action::new("베이스 잠금", async move {
            eng.run_command(Command::LockBase).await
        }))
        .unwrap();
    let eng = Arc::clone(&engine);
    queue
        .submit(Action::new("리셋", async move {
            eng.run_command(Command::Reset { no_drag: true }).await?;
            let _ = done_tx.send(());
            Ok(())
        }))
        .unwrap();

    done_rx.await.unwrap();
    assert_eq!(queue.pending_count(), 0);
    // lock_base의 이동 키 + 리셋 2회의 esc 키가 모두 기록되어야 한다
    assert_eq!(actuator.key_count("a"), 1);
    assert_eq!(actuator.key_count("esc"), 2);
    assert_eq!(engine.state(), EngineState::Idle);
}

#[tokio::test(start_paused = true)]
async fn align_records_side_from_keyword_position() {
    // 기준 키워드 x=250 > 중심 x=400 거짓 → 왼쪽;
    // 두 번째 시나리오에서 x=450 → 오른쪽
    let left_sensor = ScriptedSensor::new(vec![ScanSample::new(vec![ScanWord::new(
        "Cash",
        Point::new(250, 200),
    )])]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, _queue) =
        make_engine(left_sensor, Arc::clone(&actuator), CancelFlag::new());

    engine.align_camera().await.unwrap();
    assert_eq!(engine.plot_side(), Some(PlotSide::Left));

    let right_sensor = ScriptedSensor::new(vec![ScanSample::new(vec![ScanWord::new(
        "Collect",
        Point::new(450, 200),
    )])]);
    let actuator2 = RecordingActuator::new();
    let (engine2, _bus2, _queue2) =
        make_engine(right_sensor, actuator2, CancelFlag::new());

    engine2.align_camera().await.unwrap();
    assert_eq!(engine2.plot_side(), Some(PlotSide::Right));
}

#[tokio::test(start_paused = true)]
async fn align_failure_keeps_previous_side() {
    // 빈 샘플만 오면 방향 플래그는 그대로 None
    let sensor = ScriptedSensor::new(vec![]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, _queue) = make_engine(sensor, actuator, CancelFlag::new());

    engine.align_camera().await.unwrap();
    assert_eq!(engine.plot_side(), None);
}

#[tokio::test(start_paused = true)]
async fn idle_nudge_fires_on_long_scans() {
    // 70초 스캔 (리셋 ~7초 + 루프 ~63초) → 유휴 방지 클릭 최소 1회
    let sensor = ScriptedSensor::new(vec![]);
    let actuator = RecordingActuator::new();
    let (engine, _bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), Some(Duration::from_secs(70)))
        .await
        .unwrap();

    let nudges = actuator
        .snapshot()
        .iter()
        .filter(|c| matches!(c, Call::Click { y: 65, x } if (12..=13).contains(x)))
        .count();
    assert!(nudges >= 1, "유휴 방지 클릭이 최소 한 번 발사되어야 함");
}

#[tokio::test(start_paused = true)]
async fn empty_tick_emits_unparsed_debug_nothing_else() {
    // 인식 결과가 전혀 없으면 확인 키도 성공 이벤트도 없어야 한다
    let sensor = ScriptedSensor::new(vec![]);
    let actuator = RecordingActuator::new();
    let (engine, bus, _queue) = make_engine(sensor, Arc::clone(&actuator), CancelFlag::new());

    let successes = Arc::new(StdMutex::new(0usize));
    let s = Arc::clone(&successes);
    bus.subscribe(Topic::Success, move |_| *s.lock().unwrap() += 1);

    engine
        .scan_npcs(&filter(Some(1000.0), Some("N/A")), Some(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(actuator.key_count("e"), 0);
    assert_eq!(*successes.lock().unwrap(), 0);
}
