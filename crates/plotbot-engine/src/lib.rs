//! # plotbot-engine
//!
//! 판정·실행 코어.
//!
//! - [`action_queue`] — 단일 워커 직렬 실행 큐 (최대 1개 동시 실행)
//! - [`event_bus`] — 프로세스 공용 발행/구독 레지스트리
//! - [`classify`] — 틱 분류 + 수락 판정 (순수 함수)
//! - [`engine`] — 스캔/판정 상태 기계 ([`engine::DecisionEngine`])

pub mod action_queue;
pub mod classify;
pub mod engine;
pub mod event_bus;
