//! 단일 워커 액션 큐.
//!
//! 다중 생산자 / 단일 소비자 직렬 실행 큐.
//! 어떤 순간에도 최대 1개의 액션만 실행되며, 엄격한 FIFO 순서를
//! 보장한다. 액션 내부의 실패(에러 반환이든 패닉이든)는 워커를
//! 죽이지 않고 해당 액션만 버린다 (재시도 없음).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use plotbot_core::error::BotError;

/// 이름 붙은 지연 작업 단위
///
/// enqueue부터 완료까지 큐가 단독 소유하며 이후 보관되지 않는다.
pub struct Action {
    name: String,
    work: BoxFuture<'static, Result<(), BotError>>,
}

impl Action {
    /// 새 액션 생성
    pub fn new<F>(name: impl Into<String>, work: F) -> Self
    where
        F: std::future::Future<Output = Result<(), BotError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            work: Box::pin(work),
        }
    }

    /// 로깅용 표시 이름
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 직렬 실행 큐
///
/// 용량 제한이 없다. 배압이 필요한 호출자는 제출 전에
/// [`pending_count`](ActionQueue::pending_count)를 스스로 확인한다
/// (스캔 루프가 선점 감지에 쓰는 방식).
pub struct ActionQueue {
    tx: mpsc::UnboundedSender<Action>,
    depth: Arc<AtomicUsize>,
}

impl ActionQueue {
    /// 큐 생성 + 전용 워커 태스크 기동
    pub fn start() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let depth = Arc::new(AtomicUsize::new(0));

        tokio::spawn(worker_loop(rx, Arc::clone(&depth)));

        Arc::new(Self { tx, depth })
    }

    /// 액션을 꼬리에 추가 (논블로킹, 즉시 반환)
    ///
    /// 제출 즉시 큐 깊이가 1 증가한다.
    pub fn submit(&self, action: Action) -> Result<(), BotError> {
        let name = action.name().to_string();
        self.depth.fetch_add(1, Ordering::SeqCst);
        self.tx.send(action).map_err(|_| {
            self.depth.fetch_sub(1, Ordering::SeqCst);
            BotError::Internal("액션 큐 워커가 종료됨".to_string())
        })?;
        info!(
            action = %name,
            depth = self.depth.load(Ordering::SeqCst),
            "액션 큐에 추가"
        );
        Ok(())
    }

    /// 대기 중(아직 dequeue되지 않은) 액션 수 — 부작용 없음, 동시 호출 안전
    pub fn pending_count(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }
}

/// 워커 루프 — 큐가 빌 때까지 블로킹, 한 번에 정확히 하나 실행
async fn worker_loop(mut rx: mpsc::UnboundedReceiver<Action>, depth: Arc<AtomicUsize>) {
    info!("액션 큐 워커 시작");

    while let Some(action) = rx.recv().await {
        depth.fetch_sub(1, Ordering::SeqCst);
        let name = action.name.clone();
        debug!(action = %name, "액션 실행 시작");

        // 액션을 별도 태스크로 실행해 패닉까지 격리한다
        match tokio::spawn(action.work).await {
            Ok(Ok(())) => debug!(action = %name, "액션 완료"),
            Ok(Err(e)) if e.is_expected() => {
                info!(action = %name, cause = %e, "액션 중단 (정상 흐름)");
            }
            Ok(Err(e)) => {
                error!(action = %name, cause = %e, "액션 실행 실패 — 워커 계속");
            }
            Err(join_err) => {
                error!(action = %name, cause = %join_err, "액션 패닉 — 워커 계속");
            }
        }
    }

    info!("액션 큐 워커 종료");
}
