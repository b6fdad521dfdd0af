//! # plotbot-automation
//!
//! 액추에이터 포트 어댑터.
//!
//! - [`noop::NoOpActuator`] — 모든 입력을 로깅만 (테스트/드라이런)
//! - `driver::EnigoActuator` — 실제 마우스/키보드 입력 (`enigo` feature)

pub mod noop;

#[cfg(feature = "enigo")]
pub mod driver;
