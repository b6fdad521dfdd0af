//! 도메인 데이터 구조체.
//!
//! 스캔 샘플, 등급 사다리, 판정 결과 등 순수 데이터 타입.
//! 어댑터나 엔진 로직에 의존하지 않는다.

pub mod decision;
pub mod geometry;
pub mod input;
pub mod rarity;
pub mod scan;
