//! 라이프사이클 관리.
//!
//! 종료 신호 브로드캐스트와 OS 시그널 대기.

use std::io;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// 시그널 핸들러를 즉시 등록하고 대기 태스크 시작
    ///
    /// 등록은 호출 시점에 끝나므로 실패는 여기서 바로 반환된다.
    /// 대기 태스크는 첫 시그널에서 종료 신호를 발송한다.
    pub fn spawn_signal_handler(self: &Arc<Self>) -> io::Result<JoinHandle<()>> {
        let mut listener = SignalListener::install()?;
        let lifecycle = Arc::clone(self);
        Ok(tokio::spawn(async move {
            listener.recv().await;
            lifecycle.shutdown();
        }))
    }
}

/// 등록된 OS 시그널 수신기 (SIGINT, SIGTERM / Ctrl+C)
pub struct SignalListener {
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl SignalListener {
    /// 시그널 핸들러 등록
    pub fn install() -> io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                sigint: signal(SignalKind::interrupt())?,
                sigterm: signal(SignalKind::terminate())?,
            })
        }

        #[cfg(windows)]
        {
            Ok(Self {
                ctrl_c: tokio::signal::windows::ctrl_c()?,
            })
        }
    }

    /// 다음 시그널까지 대기
    pub async fn recv(&mut self) {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.sigint.recv() => {
                    info!("SIGINT 수신");
                }
                _ = self.sigterm.recv() => {
                    info!("SIGTERM 수신");
                }
            }
        }

        #[cfg(windows)]
        {
            self.ctrl_c.recv().await;
            info!("Ctrl+C 수신");
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
