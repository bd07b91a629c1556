//! Interval polling
//!
//! [`Poller`] runs an async task on a fixed interval until it is stopped or
//! dropped. [`InstanceMonitor`] keeps an instance list view fresh with it.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use std::sync::Arc;

use omnicloud_client::{ClientError, Instance};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::view::ListView;

/// Background task invoked on every interval tick.
///
/// The first tick fires immediately. Each iteration runs as its own task, so
/// a failed or panicking iteration is logged and the next tick runs as usual.
pub struct Poller {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: mpsc::Sender<()>,
}

impl Poller {
    /// Spawn the polling loop on the current tokio runtime
    pub fn start<F, Fut, E>(interval: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let handle = tokio::spawn(async move {
            debug!("Starting poller with interval {:?}", interval);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        debug!("Poller shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        match tokio::spawn(task()).await {
                            Ok(Ok(())) => {}
                            Ok(Err(e)) => warn!("Polling iteration failed: {}", e),
                            Err(e) if e.is_panic() => {
                                let err = ClientError::normalize(e.into_panic());
                                warn!("Polling iteration panicked: {}", err);
                            }
                            Err(e) => warn!("Polling iteration cancelled: {}", e),
                        }
                    }
                }
            }
        });

        Self {
            handle: Some(handle),
            shutdown_tx,
        }
    }

    /// Signal shutdown and wait for the loop to exit. An iteration already
    /// in progress is allowed to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Poller task ended abnormally: {}", e);
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Polls the instance list of a view.
///
/// The first poll is a full fetch; later polls refresh so the current items
/// stay visible while the request is outstanding. An optional callback sees
/// the view after every successful poll.
pub struct InstanceMonitor<T = String> {
    view: ListView<Instance, T>,
    poller: Poller,
}

impl<T> InstanceMonitor<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

    pub fn start(view: ListView<Instance, T>, interval: Duration) -> Self {
        Self::start_with(view, interval, |_| {})
    }

    /// Like [`start`](Self::start), calling `on_update` after each poll that
    /// succeeded
    pub fn start_with<F>(view: ListView<Instance, T>, interval: Duration, on_update: F) -> Self
    where
        F: Fn(&ListView<Instance, T>) + Send + Sync + 'static,
    {
        info!("Monitoring instances every {:?}", interval);
        let polled = view.clone();
        let on_update = Arc::new(on_update);
        let mut first = true;

        let poller = Poller::start(interval, move || {
            let view = polled.clone();
            let on_update = on_update.clone();
            let initial = std::mem::replace(&mut first, false);
            async move {
                if initial {
                    view.fetch().await?;
                } else {
                    view.refresh().await?;
                }
                on_update(&view);
                Ok::<_, crate::error::DashboardError>(())
            }
        });

        Self { view, poller }
    }

    pub fn view(&self) -> &ListView<Instance, T> {
        &self.view
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_running()
    }

    pub async fn stop(self) {
        self.poller.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(
        calls: Arc<AtomicUsize>,
        fail: bool,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<(), String>> + Send>> + Send + 'static
    {
        move || {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if fail { Err("boom".to_string()) } else { Ok(()) }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_runs_on_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = Poller::start(Duration::from_secs(30), counting_task(calls.clone(), false));

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(poller.is_running());
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_calls_after_stop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = Poller::start(Duration::from_secs(30), counting_task(calls.clone(), false));

        tokio::time::sleep(Duration::from_secs(1)).await;
        poller.stop().await;
        let seen = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_calls_after_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = Poller::start(Duration::from_secs(30), counting_task(calls.clone(), false));

        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(poller);
        let seen = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_do_not_stop_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = Poller::start(Duration::from_secs(10), counting_task(calls.clone(), true));

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_iteration_keeps_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let poller = Poller::start(Duration::from_secs(10), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    panic!("first poll exploded");
                }
                Ok::<_, String>(())
            }
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(poller.is_running());
        poller.stop().await;
    }
}
