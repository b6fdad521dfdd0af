//! OCR 스캔 샘플.
//!
//! 센서가 한 번의 영역 읽기로 돌려주는 (토큰, 중심 좌표) 시퀀스.
//! 분류 키워드가 토큰 경계를 넘어 인식될 수 있으므로
//! 영역 전체에 대한 부분 문자열 검색도 함께 제공한다.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// 인식된 단어 하나 (텍스트 + 중심 좌표)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWord {
    /// 인식된 텍스트 토큰
    pub text: String,
    /// 토큰 중심 좌표 (클라이언트 영역 기준)
    pub center: Point,
}

impl ScanWord {
    pub fn new(text: impl Into<String>, center: Point) -> Self {
        Self {
            text: text.into(),
            center,
        }
    }
}

/// 한 번의 OCR 읽기 결과
///
/// 틱마다 새로 생성되고 틱이 끝나면 버려진다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSample {
    words: Vec<ScanWord>,
}

impl ScanSample {
    /// 단어 목록으로 샘플 생성
    pub fn new(words: Vec<ScanWord>) -> Self {
        Self { words }
    }

    /// 인식된 단어 시퀀스 (인식 순서 유지)
    pub fn words(&self) -> &[ScanWord] {
        &self.words
    }

    /// 아무것도 인식되지 않았는지
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 영역 전체에서 키워드 검색 (대소문자 무시, 토큰 경계 무시)
    ///
    /// 공백으로 이은 텍스트와 공백 없이 이어붙인 텍스트 양쪽을 검사한다.
    /// OCR이 "legen dary"처럼 한 단어를 쪼개 내놓는 경우를 흡수하기 위함.
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return false;
        }
        let joined: String = self
            .words
            .iter()
            .map(|w| w.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.contains(&needle) {
            return true;
        }
        let fused: String = joined.split_whitespace().collect();
        fused.contains(&needle)
    }

    /// 키워드를 포함하는 첫 토큰 반환 (대소문자 무시)
    pub fn find_token_containing(&self, keyword: &str) -> Option<&ScanWord> {
        let needle = keyword.to_lowercase();
        self.words
            .iter()
            .find(|w| w.text.to_lowercase().contains(&needle))
    }
}
