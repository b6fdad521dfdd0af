//! 세션 공유 취소 플래그.
//!
//! 감독 루프와 엔진이 공유하는 유일한 취소 프리미티브.
//! 강제 인터럽트가 아니라 체크포인트에서의 협력적 관찰로 전파된다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 취소 플래그 — 설정 가능하고 논블로킹으로 확인 가능한 공유 불리언
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// 새 플래그 생성 (해제 상태)
    pub fn new() -> Self {
        Self::default()
    }

    /// 취소 요청 설정
    pub fn set(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// 취소 여부 확인 (논블로킹)
    pub fn is_set(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// 플래그 해제 — 새 세션 시작 시 재장전용
    pub fn clear(&self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}
