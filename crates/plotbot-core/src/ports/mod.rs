//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 센서(OCR 피드)와 액추에이터(입력 주입)는 이 trait 뒤의
//! 외부 콜라보레이터이며, `plotbot-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 모든 async trait은 `async_trait` 매크로를 사용하여
//! object safety를 보장한다.

pub mod actuator;
pub mod sensor;
