//! 프로세스 공용 이벤트 버스.
//!
//! 토픽별 콜백 레지스트리. 발행은 발행자 실행 컨텍스트에서의
//! 동기 팬아웃이므로 구독자는 오래 블로킹해서는 안 된다.
//! 전역 싱글턴이 아니라 `Arc<EventBus>`로 명시적으로 주입한다.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use parking_lot::RwLock;
use tracing::error;

/// 잘 알려진 토픽 집합
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// 상태 표시줄 변경
    Status,
    /// 툴팁 (메시지 + 색상)
    Tooltip,
    /// 디버그 로그
    Debug,
    /// 일반 로그
    Log,
    /// 매치 성공
    Success,
}

/// 메시지 색상 태그 (관찰자 UI 힌트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipColor {
    #[default]
    Gray,
    Red,
    Green,
    Orange,
}

/// 발행 페이로드 — 메시지 텍스트 + 색상 태그
#[derive(Debug, Clone)]
pub struct BusMessage {
    pub text: String,
    pub color: TipColor,
}

impl BusMessage {
    pub fn new(text: impl Into<String>, color: TipColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

type Callback = Box<dyn Fn(&BusMessage) + Send + Sync>;

/// 발행/구독 레지스트리
///
/// 토픽별 콜백은 구독 순서대로 호출된다. 구독자 없는 토픽에
/// 발행하는 것은 no-op이며 에러가 아니다.
#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<HashMap<Topic, Vec<Callback>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 토픽에 콜백 등록. 한 토픽에 여러 콜백 허용.
    ///
    /// 콜백 내부에서 다시 `publish`하는 것은 허용되지만 (재귀 읽기 락),
    /// 콜백 내부에서 `subscribe`를 호출하는 것은 지원하지 않는다
    /// (발행 중 읽기 락 보유 — 쓰기 락과 교착).
    pub fn subscribe<F>(&self, topic: Topic, callback: F)
    where
        F: Fn(&BusMessage) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .entry(topic)
            .or_default()
            .push(Box::new(callback));
    }

    /// 토픽의 모든 콜백을 구독 순서대로 동기 호출
    ///
    /// 패닉하는 콜백이 있어도 나머지 콜백은 계속 실행된다.
    pub fn publish(&self, topic: Topic, message: &BusMessage) {
        // 콜백이 재발행해도 대기 중인 쓰기 락 뒤에서 멈추지 않도록 재귀 읽기
        let guard = self.subscribers.read_recursive();
        let Some(callbacks) = guard.get(&topic) else {
            return;
        };
        for callback in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(message))).is_err() {
                error!(?topic, "구독자 콜백 패닉 — 나머지 구독자 계속 실행");
            }
        }
    }

    // ── 의미별 발행 래퍼 ──

    /// 상태 변경 발행 (기본 회색)
    pub fn change_status(&self, message: impl Into<String>, color: TipColor) {
        self.publish(Topic::Status, &BusMessage::new(message, color));
    }

    /// 툴팁 발행
    pub fn tooltip(&self, message: impl Into<String>, color: TipColor) {
        self.publish(Topic::Tooltip, &BusMessage::new(message, color));
    }

    /// 디버그 메시지 발행
    pub fn debug(&self, message: impl Into<String>) {
        self.publish(Topic::Debug, &BusMessage::new(message, TipColor::Gray));
    }

    /// 일반 로그 발행
    pub fn log(&self, message: impl Into<String>) {
        self.publish(Topic::Log, &BusMessage::new(message, TipColor::Gray));
    }

    /// 매치 성공 발행
    pub fn success(&self, message: impl Into<String>) {
        self.publish(Topic::Success, &BusMessage::new(message, TipColor::Green));
    }
}
