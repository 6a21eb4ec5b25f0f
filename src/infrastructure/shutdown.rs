use tokio::sync::watch;

/// Cooperative shutdown flag for the stream loop and in-flight work. Cloned
/// handles can trigger it; once triggered it stays triggered.
#[derive(Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            tx: watch::channel(false).0,
        }
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener(self.tx.subscribe())
    }
}

pub struct ShutdownListener(watch::Receiver<bool>);

impl ShutdownListener {
    pub fn is_triggered(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once `trigger` has been called, immediately if it already was.
    pub async fn notified(&mut self) {
        let _ = self.0.wait_for(|triggered| *triggered).await;
    }
}

/// Maps CTRL+C and SIGTERM onto the shutdown flag.
pub fn install_signal_handlers(shutdown: Shutdown) {
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.trigger();
            }
        }
    });

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
            shutdown.trigger();
        }
    });
}
