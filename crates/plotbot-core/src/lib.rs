//! # plotbot-core
//!
//! PLOTBOT 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (스캔 샘플, 등급 사다리, 판정 결과)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`humanize`] — 사람이 읽는 수치 문자열 정규화 ("1.5k" → 1500)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)
//! - [`cancel`] — 세션 공유 취소 플래그

pub mod cancel;
pub mod config;
pub mod config_manager;
pub mod error;
pub mod humanize;
pub mod models;
pub mod ports;
