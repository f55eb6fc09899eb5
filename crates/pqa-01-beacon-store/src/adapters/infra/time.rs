use crate::ports::outbound::TimeSource;
use shared_types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// A time source that only moves when told to.
///
/// Each `now_nanos` call still advances by one nanosecond so successive
/// writes get distinct update stamps.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    secs: AtomicU64,
    tick: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(secs: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(secs),
            tick: AtomicU64::new(0),
        }
    }

    pub fn set(&self, secs: Timestamp) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.secs.load(Ordering::SeqCst)
    }

    fn now_nanos(&self) -> u64 {
        let tick = self.tick.fetch_add(1, Ordering::SeqCst);
        self.now()
            .saturating_mul(1_000_000_000)
            .saturating_add(tick)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn now_nanos(&self) -> u64 {
        (**self).now_nanos()
    }
}
