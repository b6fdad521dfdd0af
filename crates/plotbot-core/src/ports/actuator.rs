//! 액추에이터 포트 — 마우스/키보드 입력 주입.
//!
//! 좌표는 전부 대상 서피스의 클라이언트 영역 기준이며
//! 전역 좌표 변환은 구현체의 책임이다.
//!
//! 구현체: `EnigoActuator` (실제 입력), `NoOpActuator` (테스트/드라이런)

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BotError;
use crate::models::input::MouseButton;

/// 입력 주입 인터페이스
#[async_trait]
pub trait Actuator: Send + Sync {
    /// 키를 `hold` 동안 누르고 있다가 놓는다 (`Duration::ZERO`면 탭)
    async fn key_press(&self, key: &str, hold: Duration) -> Result<(), BotError>;

    /// 지정 좌표로 이동 후 클릭
    async fn click(&self, x: i32, y: i32, button: MouseButton) -> Result<(), BotError>;

    /// 드래그 (시작 좌표 → 끝 좌표)
    async fn drag(
        &self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        button: MouseButton,
    ) -> Result<(), BotError>;

    /// 휠 스크롤 (양수: 위, 음수: 아래)
    async fn scroll(&self, amount: i32) -> Result<(), BotError>;

    /// 마우스 이동 (클릭 없음)
    async fn mouse_move(&self, x: i32, y: i32) -> Result<(), BotError>;

    /// 플랫폼 이름 (예: "macos", "windows", "linux", "noop")
    fn platform(&self) -> &str;
}
