//! Cooperative shutdown signalling between the run loop and its ticker.

#![forbid(unsafe_code)]

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared stop flag with condvar-based timed waiting.
///
/// Cloned into worker threads that need to sleep between ticks but wake
/// immediately when shutdown is requested.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

/// The requesting half of a [`StopSignal`] pair.
#[derive(Debug, Clone)]
pub struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Creates a linked signal/trigger pair.
    pub fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Returns `true` once stop has been requested.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks for up to `duration`, waking early on stop.
    ///
    /// Returns `true` if stop was requested, `false` if the full duration
    /// elapsed. Spurious condvar wakeups are absorbed by re-waiting for the
    /// remaining time.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now() + duration;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            stopped = guard;
        }
        true
    }
}

impl StopTrigger {
    /// Requests stop and wakes every waiter.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner()) = true;
        cvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn wait_times_out_when_not_stopped() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(5)));
        assert!(!signal.is_stopped());
    }

    #[test]
    fn trigger_wakes_waiter_early() {
        let (signal, trigger) = StopSignal::new();
        let handle = thread::spawn(move || signal.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(10));
        trigger.stop();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn stop_is_sticky() {
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::ZERO));
        assert!(signal.wait_timeout(Duration::from_millis(1)));
    }
}
