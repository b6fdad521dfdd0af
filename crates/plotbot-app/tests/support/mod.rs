//! 통합 테스트 공용 목(mock) 어댑터.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use plotbot_core::cancel::CancelFlag;
use plotbot_core::error::BotError;
use plotbot_core::models::geometry::{Point, Region};
use plotbot_core::models::input::MouseButton;
use plotbot_core::models::scan::{ScanSample, ScanWord};
use plotbot_core::ports::actuator::Actuator;
use plotbot_core::ports::sensor::Sensor;

/// 토큰 목록으로 샘플 구성 (x 좌표는 토큰 순서대로 증가)
pub fn sample(tokens: &[&str]) -> ScanSample {
    ScanSample::new(
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| ScanWord::new(*t, Point::new(i as i32 * 50, 0)))
            .collect(),
    )
}

/// 대본이 있는 센서 — 준비된 샘플을 순서대로 반환, 소진 후 빈 샘플
pub struct ScriptedSensor {
    script: Mutex<VecDeque<ScanSample>>,
}

impl ScriptedSensor {
    pub fn new(samples: Vec<ScanSample>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(samples.into()),
        })
    }
}

#[async_trait]
impl Sensor for ScriptedSensor {
    async fn read_region(&self, _region: Region) -> Result<ScanSample, BotError> {
        Ok(self.script.lock().pop_front().unwrap_or_default())
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// 액추에이터 호출 기록
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Key { key: String, hold: Duration },
    Click { x: i32, y: i32 },
    Drag,
    Scroll(i32),
    Move { x: i32, y: i32 },
}

/// 기록형 액추에이터 — 모든 호출을 순서대로 기록
///
/// `cancel_on_key`가 설정되면 해당 키 입력 시점에 취소 플래그를
/// 세운다 (슬립 중 취소가 도착하는 시나리오 재현용).
pub struct RecordingActuator {
    pub calls: Mutex<Vec<Call>>,
    cancel_on_key: Option<(String, CancelFlag)>,
}

impl RecordingActuator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            cancel_on_key: None,
        })
    }

    pub fn cancelling_on(key: &str, cancel: CancelFlag) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            cancel_on_key: Some((key.to_string(), cancel)),
        })
    }

    /// 기록된 키 입력 중 `key`의 횟수
    pub fn key_count(&self, key: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Key { key: k, .. } if k == key))
            .count()
    }

    pub fn snapshot(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn key_press(&self, key: &str, hold: Duration) -> Result<(), BotError> {
        self.calls.lock().push(Call::Key {
            key: key.to_string(),
            hold,
        });
        if let Some((trigger, cancel)) = &self.cancel_on_key {
            if key == trigger {
                cancel.set();
            }
        }
        Ok(())
    }

    async fn click(&self, x: i32, y: i32, _button: MouseButton) -> Result<(), BotError> {
        self.calls.lock().push(Call::Click { x, y });
        Ok(())
    }

    async fn drag(
        &self,
        _from_x: i32,
        _from_y: i32,
        _to_x: i32,
        _to_y: i32,
        _button: MouseButton,
    ) -> Result<(), BotError> {
        self.calls.lock().push(Call::Drag);
        Ok(())
    }

    async fn scroll(&self, amount: i32) -> Result<(), BotError> {
        self.calls.lock().push(Call::Scroll(amount));
        Ok(())
    }

    async fn mouse_move(&self, x: i32, y: i32) -> Result<(), BotError> {
        self.calls.lock().push(Call::Move { x, y });
        Ok(())
    }

    fn platform(&self) -> &str {
        "recording"
    }
}
