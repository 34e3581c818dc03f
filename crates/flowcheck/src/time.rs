// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic testing.
//!
//! The reporter names its result file after the wall-clock time at the start
//! of a run, and waits for the next second when that name is taken. Tests
//! drive both through a [`FakeClock`] instead of real time.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime};

/// Clock trait for time abstraction
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Sleep for a duration
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real clock using the local system time
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Fake clock for testing with controllable time
///
/// Sleeping advances the clock instead of waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    /// Milliseconds since the epoch, read as a naive local time
    current_millis: Arc<AtomicI64>,
}

impl FakeClock {
    /// Fake clock fixed at the given local time
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            current_millis: Arc::new(AtomicI64::new(time.and_utc().timestamp_millis())),
        }
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        self.current_millis
            .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> NaiveDateTime {
        let millis = self.current_millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis)
            .unwrap_or_default()
            .naive_utc()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.advance(duration);
        Box::pin(async {})
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
