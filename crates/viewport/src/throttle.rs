//! Pointer-move rate limiting.
//!
//! A last-processed-timestamp guard checked synchronously in the move handler.
//! Events that arrive inside the interval are coalesced: callers still record
//! the latest position, but skip derived work (ruler redraw, rubber-band update)
//! until the next event that passes.

use std::time::Duration;

/// Last-processed-timestamp rate limiter.
#[derive(Debug, Clone)]
pub struct PointerThrottle {
    interval: Duration,
    last_processed: Option<Duration>,
}

impl PointerThrottle {
    /// Create a limiter that lets one event through per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_processed: None,
        }
    }

    /// Minimum spacing between processed events.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and records `timestamp`) if enough time has passed since
    /// the last processed event.
    ///
    /// A timestamp earlier than the last processed one (host clock reset) is
    /// treated as due.
    pub fn should_process(&mut self, timestamp: Duration) -> bool {
        let due = match self.last_processed {
            None => true,
            Some(last) => timestamp < last || timestamp - last >= self.interval,
        };

        if due {
            self.last_processed = Some(timestamp);
        } else {
            log::trace!("pointer move at {:?} coalesced", timestamp);
        }
        due
    }

    /// Forget the last processed event; the next move always passes.
    pub fn reset(&mut self) {
        self.last_processed = None;
    }
}

impl Default for PointerThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}
