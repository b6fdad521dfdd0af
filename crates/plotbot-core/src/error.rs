//! PLOTBOT 핵심 에러 타입.
//!
//! 어댑터 crate와 엔진은 모두 `BotError`로 실패를 표현한다.
//! `Cancelled`/`Preempted`는 정상 흐름의 일부이며 에러 레벨로 로깅하지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 명령 취소/선점, 파싱, 콜라보레이터 장애 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum BotError {
    /// 사용자가 취소 플래그를 설정함 (정상 종료 경로)
    #[error("사용자 요청으로 중지됨")]
    Cancelled,

    /// 큐에 경쟁 명령이 대기 중이라 스캔을 양보함 (정상 종료 경로)
    #[error("대기 중인 명령에 의해 선점됨")]
    Preempted,

    /// 수치 문자열 형식 오류 ("1.5k" 형식 불일치)
    #[error("잘못된 수치 형식: '{0}'")]
    InvalidFormat(String),

    /// 센서(OCR 피드) 장애
    #[error("센서 에러: {0}")]
    Sensor(String),

    /// 액추에이터(입력 주입) 장애
    #[error("액추에이터 에러: {0}")]
    Actuator(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl BotError {
    /// 정상 흐름에 속하는 에러인지 (취소/선점 — error 레벨 로깅 금지)
    pub fn is_expected(&self) -> bool {
        matches!(self, BotError::Cancelled | BotError::Preempted)
    }
}
