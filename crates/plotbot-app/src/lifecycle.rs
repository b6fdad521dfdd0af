//! 라이프사이클 관리.
//!
//! OS 시그널(SIGINT/SIGTERM)을 세션 취소 플래그로 변환한다.

use plotbot_core::cancel::CancelFlag;
use tracing::info;

/// 라이프사이클 관리자
pub struct LifecycleManager {
    cancel: CancelFlag,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new(cancel: CancelFlag) -> Self {
        Self { cancel }
    }

    /// OS 시그널 대기 후 취소 플래그 설정
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT 핸들러 등록 실패");
            let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM 핸들러 등록 실패");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("SIGINT 수신");
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM 수신");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c()
                .await
                .expect("Ctrl+C 핸들러 등록 실패");
            info!("Ctrl+C 수신");
        }

        info!("종료 신호 발송 — 취소 플래그 설정");
        self.cancel.set();
    }
}
