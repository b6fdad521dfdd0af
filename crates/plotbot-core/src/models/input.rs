//! 입력 장치 모델.
//!
//! Actuator 포트가 참조하는 공용 타입.

use serde::{Deserialize, Serialize};

/// 마우스 버튼 유형
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// 로깅용 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_button_serde() {
        let json = serde_json::to_string(&MouseButton::Right).unwrap();
        let deser: MouseButton = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, MouseButton::Right);
        assert_eq!(deser.as_str(), "right");
    }
}
