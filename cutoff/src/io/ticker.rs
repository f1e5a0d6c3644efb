//! Periodic refresh ticks for board hosts.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};

/// How often hosts recompute the displayed clocks and statuses.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Fixed-interval tick source backed by a background thread.
///
/// Dropping the ticker stops the thread and joins it; a torn-down host
/// must not leave a recurring callback running.
#[derive(Debug)]
pub struct RefreshTicker {
    ticks: Receiver<()>,
    stop: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTicker {
    /// Start ticking every `interval`.
    pub fn start(interval: Duration) -> Result<Self> {
        let (tick_tx, ticks) = mpsc::channel();
        let (stop, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name("board-refresh".to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            // Consumer gone means there is nobody left to
                            // refresh for.
                            if tick_tx.send(()).is_err() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .context("spawn refresh ticker thread")?;

        Ok(Self {
            ticks,
            stop,
            handle: Some(handle),
        })
    }

    /// Receiver yielding one unit per elapsed interval.
    pub fn ticks(&self) -> &Receiver<()> {
        &self.ticks
    }
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn ticks_arrive_at_roughly_the_interval() {
        let ticker = RefreshTicker::start(Duration::from_millis(10)).expect("start");
        let started = Instant::now();
        ticker
            .ticks()
            .recv_timeout(Duration::from_secs(5))
            .expect("first tick");
        ticker
            .ticks()
            .recv_timeout(Duration::from_secs(5))
            .expect("second tick");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn drop_stops_the_background_thread() {
        let ticker = RefreshTicker::start(Duration::from_secs(3600)).expect("start");
        let started = Instant::now();
        drop(ticker);
        // Drop joins the thread; with a pending hour-long interval this
        // only returns promptly if the stop signal interrupted it.
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn no_tick_before_the_interval_elapses() {
        let ticker = RefreshTicker::start(Duration::from_secs(3600)).expect("start");
        let result = ticker.ticks().recv_timeout(Duration::from_millis(50));
        assert_eq!(result, Err(RecvTimeoutError::Timeout));
    }
}
