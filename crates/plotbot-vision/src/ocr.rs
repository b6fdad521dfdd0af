//! Tesseract OCR 센서.
//!
//! xcap으로 주 모니터를 캡처하고 요청 영역을 잘라
//! leptess로 워드 레벨 텍스트 + 바운딩 박스를 추출한다.
//! 첫 호출마다 새 LepTess 인스턴스를 만들지만 tessdata 경로는
//! 생성 시 한 번만 결정된다.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use xcap::Monitor;

use plotbot_core::error::BotError;
use plotbot_core::models::geometry::{Point, Region};
use plotbot_core::models::scan::{ScanSample, ScanWord};
use plotbot_core::ports::sensor::Sensor;

/// Tesseract 기반 화면 영역 센서
pub struct TesseractSensor {
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    tessdata_path: Option<PathBuf>,
}

impl TesseractSensor {
    /// 새 센서 생성
    pub fn new(tessdata_path: Option<PathBuf>) -> Self {
        Self { tessdata_path }
    }

    /// 주 모니터 캡처 후 요청 영역 크롭
    fn capture_region(region: Region) -> Result<image::RgbaImage, BotError> {
        let monitors =
            Monitor::all().map_err(|e| BotError::Sensor(format!("모니터 목록 조회 실패: {e}")))?;
        let monitor = monitors
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| Monitor::all().ok()?.into_iter().next())
            .ok_or_else(|| BotError::Sensor("모니터를 찾을 수 없음".to_string()))?;

        let full = monitor
            .capture_image()
            .map_err(|e| BotError::Sensor(format!("스크린 캡처 실패: {e}")))?;

        let (w, h) = (region.width(), region.height());
        if w == 0 || h == 0 {
            return Err(BotError::Sensor("빈 캡처 영역".to_string()));
        }

        let cropped = image::imageops::crop_imm(
            &full,
            region.left.max(0) as u32,
            region.top.max(0) as u32,
            w,
            h,
        )
        .to_image();
        Ok(cropped)
    }
}

#[async_trait]
impl Sensor for TesseractSensor {
    async fn read_region(&self, region: Region) -> Result<ScanSample, BotError> {
        let tessdata = self
            .tessdata_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());

        // 캡처와 OCR 모두 블로킹 — 워커 스레드로 이동
        let sample = tokio::task::spawn_blocking(move || -> Result<ScanSample, BotError> {
            let rgba = Self::capture_region(region)?;
            let (w, h) = (rgba.width(), rgba.height());
            let raw = rgba.into_raw();

            let mut lt = leptess::LepTess::new(tessdata.as_deref(), "eng")
                .map_err(|e| BotError::Sensor(format!("OCR 초기화 실패: {e}")))?;
            lt.set_image_from_mem(&raw, w as i32, h as i32, 4, (w * 4) as i32)
                .map_err(|_| BotError::Sensor("이미지 메모리 설정 실패".to_string()))?;

            let boxes = lt
                .get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_WORD, true)
                .ok_or_else(|| BotError::Sensor("워드 박스 추출 실패".to_string()))?;
            let full_text = lt
                .get_utf8_text()
                .map_err(|e| BotError::Sensor(format!("텍스트 추출 실패: {e}")))?;
            let tokens: Vec<&str> = full_text.split_whitespace().collect();

            // 워드 박스 좌표는 크롭 기준 — 클라이언트 영역 좌표로 환산
            let mut words = Vec::new();
            for (i, b) in boxes.iter().enumerate() {
                let geom = b.get_geometry();
                let text = tokens.get(i).unwrap_or(&"").to_string();
                if text.is_empty() {
                    continue;
                }
                let center = Point::new(
                    region.left + geom.x + geom.w / 2,
                    region.top + geom.y + geom.h / 2,
                );
                words.push(ScanWord::new(text, center));
            }
            Ok(ScanSample::new(words))
        })
        .await
        .map_err(|e| BotError::Sensor(format!("OCR 작업 조인 실패: {e}")))??;

        debug!(tokens = sample.words().len(), "영역 OCR 완료");
        Ok(sample)
    }

    fn provider_name(&self) -> &str {
        "tesseract"
    }
}
