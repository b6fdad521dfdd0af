//! No-Op 센서 — 테스트/드라이런용.

use async_trait::async_trait;
use tracing::debug;

use plotbot_core::error::BotError;
use plotbot_core::models::geometry::Region;
use plotbot_core::models::scan::ScanSample;
use plotbot_core::ports::sensor::Sensor;

/// No-Op 센서 — 항상 빈 샘플 반환
///
/// 드라이런 모드와 화면 없는 환경에서 사용.
pub struct NoOpSensor;

#[async_trait]
impl Sensor for NoOpSensor {
    async fn read_region(&self, region: Region) -> Result<ScanSample, BotError> {
        debug!(?region, "[NoOp] 영역 읽기 (항상 빈 샘플)");
        Ok(ScanSample::default())
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}
