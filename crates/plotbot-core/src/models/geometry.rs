//! 화면 좌표 타입.
//!
//! 모든 좌표는 대상 서피스의 클라이언트 영역 기준이다.
//! 전역 좌표 변환은 액추에이터 어댑터의 책임.

use serde::{Deserialize, Serialize};

/// 클라이언트 영역 내 한 점
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 바운딩 박스 (left, top, right, bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// 박스 너비 (음수 방지)
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    /// 박스 높이 (음수 방지)
    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    /// 박스 중심점
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_dimensions() {
        let r = Region::new(148, 95, 610, 514);
        assert_eq!(r.width(), 462);
        assert_eq!(r.height(), 419);
        assert_eq!(r.center(), Point::new(379, 304));
    }

    #[test]
    fn degenerate_region_clamps_to_zero() {
        let r = Region::new(10, 10, 5, 5);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
    }
}
