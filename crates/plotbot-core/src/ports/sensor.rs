//! 센서 포트 — 화면 영역 OCR 피드.
//!
//! 구현체: `TesseractSensor` (xcap 캡처 + leptess), `NoOpSensor` (테스트/드라이런)

use async_trait::async_trait;

use crate::error::BotError;
use crate::models::geometry::Region;
use crate::models::scan::ScanSample;

/// 화면 영역 OCR 센서
///
/// 초당 여러 번 호출되므로 구현체는 호출마다 무한히 자원을
/// 쌓아서는 안 된다.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// 지정 영역을 읽어 (토큰, 좌표) 시퀀스를 반환
    async fn read_region(&self, region: Region) -> Result<ScanSample, BotError>;

    /// 제공자 이름 (예: "tesseract", "noop")
    fn provider_name(&self) -> &str;
}
