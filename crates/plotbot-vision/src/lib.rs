//! # plotbot-vision
//!
//! 센서 포트 어댑터.
//!
//! - [`noop::NoOpSensor`] — 항상 빈 샘플 (테스트/드라이런)
//! - `ocr::TesseractSensor` — xcap 캡처 + leptess OCR (`ocr` feature)

pub mod noop;

#[cfg(feature = "ocr")]
pub mod ocr;
