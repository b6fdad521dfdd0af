//! enigo 기반 실제 입력 드라이버.
//!
//! macOS: Accessibility 권한 필요
//! Windows: UIAccess 또는 관리자 권한 필요
//! Linux: X11 또는 Wayland + uinput 권한 필요

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use plotbot_core::error::BotError;
use plotbot_core::models::input::MouseButton;
use plotbot_core::ports::actuator::Actuator;

/// 실제 마우스/키보드 액추에이터 (enigo 기반)
pub struct EnigoActuator {
    /// enigo 인스턴스 (Send지만 !Sync → tokio::sync::Mutex 사용)
    enigo: tokio::sync::Mutex<enigo::Enigo>,
    /// 클라이언트 영역 → 전역 좌표 오프셋 (대상 창의 좌상단)
    origin: (i32, i32),
}

impl EnigoActuator {
    /// 새 EnigoActuator 생성
    ///
    /// `origin`: 대상 서피스 클라이언트 영역의 전역 좌상단 좌표.
    /// 창이 (0,0)으로 표준화된 환경이면 `(0, 0)`.
    pub fn new(origin: (i32, i32)) -> Result<Self, BotError> {
        let settings = enigo::Settings::default();
        let enigo = enigo::Enigo::new(&settings)
            .map_err(|e| BotError::Actuator(format!("입력 드라이버 초기화 실패: {e}")))?;
        Ok(Self {
            enigo: tokio::sync::Mutex::new(enigo),
            origin,
        })
    }

    fn to_global(&self, x: i32, y: i32) -> (i32, i32) {
        (self.origin.0 + x, self.origin.1 + y)
    }

    /// 문자열 → enigo 키 매핑
    fn parse_key(key: &str) -> enigo::Key {
        match key.to_lowercase().as_str() {
            "enter" | "return" => enigo::Key::Return,
            "escape" | "esc" => enigo::Key::Escape,
            "tab" => enigo::Key::Tab,
            "space" => enigo::Key::Space,
            "backspace" => enigo::Key::Backspace,
            "up" | "uparrow" => enigo::Key::UpArrow,
            "down" | "downarrow" => enigo::Key::DownArrow,
            "left" | "leftarrow" => enigo::Key::LeftArrow,
            "right" | "rightarrow" => enigo::Key::RightArrow,
            "ctrl" | "control" => enigo::Key::Control,
            "shift" => enigo::Key::Shift,
            "alt" | "option" => enigo::Key::Alt,
            other => {
                if let Some(ch) = other.chars().next() {
                    if other.chars().count() == 1 {
                        return enigo::Key::Unicode(ch);
                    }
                }
                debug!("알 수 없는 키: {other}, Unicode 첫 글자 폴백");
                enigo::Key::Unicode(other.chars().next().unwrap_or(' '))
            }
        }
    }

    fn map_button(button: MouseButton) -> enigo::Button {
        match button {
            MouseButton::Left => enigo::Button::Left,
            MouseButton::Right => enigo::Button::Right,
            MouseButton::Middle => enigo::Button::Middle,
        }
    }
}

#[async_trait]
impl Actuator for EnigoActuator {
    async fn key_press(&self, key: &str, hold: Duration) -> Result<(), BotError> {
        use enigo::Keyboard;
        debug!(key, hold_ms = hold.as_millis() as u64, "[Enigo] 키 입력");
        let parsed = Self::parse_key(key);
        let mut enigo = self.enigo.lock().await;
        enigo
            .key(parsed, enigo::Direction::Press)
            .map_err(|e| BotError::Actuator(format!("키 누름 실패: {e}")))?;
        if !hold.is_zero() {
            tokio::time::sleep(hold).await;
        }
        enigo
            .key(parsed, enigo::Direction::Release)
            .map_err(|e| BotError::Actuator(format!("키 놓음 실패: {e}")))?;
        Ok(())
    }

    async fn click(&self, x: i32, y: i32, button: MouseButton) -> Result<(), BotError> {
        use enigo::Mouse;
        let (gx, gy) = self.to_global(x, y);
        debug!(x, y, button = button.as_str(), "[Enigo] 마우스 클릭");
        let mut enigo = self.enigo.lock().await;
        enigo
            .move_mouse(gx, gy, enigo::Coordinate::Abs)
            .map_err(|e| BotError::Actuator(format!("마우스 이동 실패: {e}")))?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        enigo
            .button(Self::map_button(button), enigo::Direction::Click)
            .map_err(|e| BotError::Actuator(format!("마우스 클릭 실패: {e}")))?;
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
        use enigo::Mouse;
        let (gx0, gy0) = self.to_global(from_x, from_y);
        let (gx1, gy1) = self.to_global(to_x, to_y);
        debug!(from_x, from_y, to_x, to_y, button = button.as_str(), "[Enigo] 드래그");
        let btn = Self::map_button(button);
        let mut enigo = self.enigo.lock().await;
        enigo
            .move_mouse(gx0, gy0, enigo::Coordinate::Abs)
            .map_err(|e| BotError::Actuator(format!("마우스 이동 실패: {e}")))?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        enigo
            .button(btn, enigo::Direction::Press)
            .map_err(|e| BotError::Actuator(format!("버튼 누름 실패: {e}")))?;
        // 드래그로 인식되도록 중간 지점을 거쳐 이동
        let (mx, my) = ((gx0 + gx1) / 2, (gy0 + gy1) / 2);
        for (px, py) in [(mx, my), (gx1, gy1)] {
            tokio::time::sleep(Duration::from_millis(250)).await;
            enigo
                .move_mouse(px, py, enigo::Coordinate::Abs)
                .map_err(|e| BotError::Actuator(format!("드래그 이동 실패: {e}")))?;
        }
        enigo
            .button(btn, enigo::Direction::Release)
            .map_err(|e| BotError::Actuator(format!("버튼 놓음 실패: {e}")))?;
        Ok(())
    }

    async fn scroll(&self, amount: i32) -> Result<(), BotError> {
        use enigo::Mouse;
        debug!(amount, "[Enigo] 스크롤");
        let mut enigo = self.enigo.lock().await;
        // enigo의 스크롤 방향은 양수가 아래 — 포트 규약(양수=위)에 맞춰 반전
        enigo
            .scroll(-amount, enigo::Axis::Vertical)
            .map_err(|e| BotError::Actuator(format!("스크롤 실패: {e}")))?;
        Ok(())
    }

    async fn mouse_move(&self, x: i32, y: i32) -> Result<(), BotError> {
        use enigo::Mouse;
        let (gx, gy) = self.to_global(x, y);
        debug!(x, y, "[Enigo] 마우스 이동");
        let mut enigo = self.enigo.lock().await;
        enigo
            .move_mouse(gx, gy, enigo::Coordinate::Abs)
            .map_err(|e| BotError::Actuator(format!("마우스 이동 실패: {e}")))?;
        Ok(())
    }

    fn platform(&self) -> &str {
        #[cfg(target_os = "macos")]
        {
            "macos"
        }
        #[cfg(target_os = "windows")]
        {
            "windows"
        }
        #[cfg(target_os = "linux")]
        {
            "linux"
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            "unknown"
        }
    }
}
