//! No-Op 액추에이터 — 테스트/드라이런용.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use plotbot_core::error::BotError;
use plotbot_core::models::input::MouseButton;
use plotbot_core::ports::actuator::Actuator;

/// No-Op 액추에이터 — 모든 입력을 로깅만 하고 실행하지 않음
///
/// 드라이런 모드, 시뮬레이션, 로깅 전용 모드에서 사용.
pub struct NoOpActuator;

#[async_trait]
impl Actuator for NoOpActuator {
    async fn key_press(&self, key: &str, hold: Duration) -> Result<(), BotError> {
        debug!(key, hold_ms = hold.as_millis() as u64, "[NoOp] 키 입력");
        Ok(())
    }

    async fn click(&self, x: i32, y: i32, button: MouseButton) -> Result<(), BotError> {
        debug!(x, y, button = button.as_str(), "[NoOp] 마우스 클릭");
        Ok(())
    }

    async fn drag(
        &self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        button: MouseButton,
    ) -> Result<(), BotError> {
        debug!(
            from_x,
            from_y,
            to_x,
            to_y,
            button = button.as_str(),
            "[NoOp] 드래그"
        );
        Ok(())
    }

    async fn scroll(&self, amount: i32) -> Result<(), BotError> {
        debug!(amount, "[NoOp] 스크롤");
        Ok(())
    }

    async fn mouse_move(&self, x: i32, y: i32) -> Result<(), BotError> {
        debug!(x, y, "[NoOp] 마우스 이동");
        Ok(())
    }

    fn platform(&self) -> &str {
        "noop"
    }
}
