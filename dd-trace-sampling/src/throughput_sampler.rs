// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use dd_trace::dd_info;

use crate::constants::throughput::{BUCKETS_PER_S, BUFFER_DURATION, BUFFER_SIZE};
use crate::sampler::Sampler;
use crate::types::SampledSpan;

/// Sampler applying a strict limit over the trace volume.
///
/// Stops keeping traces once more than `tps` traces per second were kept. The count is
/// maintained over a trailing window of `BUFFER_DURATION` seconds, split into a circular
/// buffer of `BUFFER_SIZE` buckets, so the limit does not reset abruptly at second boundaries.
///
/// Spans are bucketed by their own start time, not by the time the decision is taken.
///
/// **Deprecated**: prefer a [`crate::RateSampler`] and let the Agent enforce volume limits.
#[derive(Clone)]
pub struct ThroughputSampler {
    /// Maximum number of traces kept over the whole window
    buffer_limit: u64,

    /// Window state, shared between clones of the sampler
    inner: Arc<Mutex<ThroughputState>>,
}

/// The circular buffer counting kept traces over the last `BUFFER_DURATION`
struct ThroughputState {
    /// Sum of all the buckets
    counter: u64,

    /// Kept traces per tick, indexed by `tick % BUFFER_SIZE`
    counter_buffer: [u64; BUFFER_SIZE],

    /// Most recent tick the window was advanced to
    last_track_time: i64,
}

impl ThroughputState {
    fn key_from_time(t: i64) -> usize {
        t.rem_euclid(BUFFER_SIZE as i64) as usize
    }

    /// Clears the buckets of the ticks in `(start, end]`.
    ///
    /// At most `BUFFER_SIZE` buckets are cleared: past a full rotation every bucket is stale.
    fn expire_buckets(&mut self, start: i64, end: i64) {
        let period = end.saturating_sub(start).clamp(0, BUFFER_SIZE as i64);
        for i in 1..=period {
            let key = Self::key_from_time(start.saturating_add(i));
            self.counter -= self.counter_buffer[key];
            self.counter_buffer[key] = 0;
        }
    }

    fn advance(&mut self, now: i64) {
        // Out of order spans are counted against the current window without expiring anything
        if now > self.last_track_time {
            let last_track_time = self.last_track_time;
            self.last_track_time = now;
            self.expire_buckets(last_track_time, now);
        }
    }
}

impl fmt::Debug for ThroughputSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("ThroughputSampler")
            .field("buffer_limit", &self.buffer_limit)
            .field("counter", &state.counter)
            .field("last_track_time", &state.last_track_time)
            .finish()
    }
}

impl ThroughputSampler {
    /// Creates a new `ThroughputSampler` keeping up to `tps` traces per second.
    ///
    /// A `tps` of 0 drops every trace.
    pub fn new(tps: u32) -> Self {
        let state = ThroughputState {
            counter: 0,
            counter_buffer: [0; BUFFER_SIZE],
            last_track_time: 0,
        };
        let sampler = ThroughputSampler {
            buffer_limit: u64::from(tps) * BUFFER_DURATION,
            inner: Arc::new(Mutex::new(state)),
        };
        dd_info!(
            "ThroughputSampler: initialized, sample up to {} traces/s",
            tps
        );
        sampler
    }

    /// Returns the maximum number of traces kept over the trailing window
    pub fn buffer_limit(&self) -> u64 {
        self.buffer_limit
    }

    /// Decides whether a span started at `start` (in seconds) is kept, and counts it if so.
    pub fn sample_at(&self, start: f64) -> bool {
        let now = (start * BUCKETS_PER_S as f64).floor() as i64;

        let mut state = self.lock_state();
        state.advance(now);

        let sampled = state.counter < self.buffer_limit;
        if sampled {
            state.counter += 1;
            state.counter_buffer[ThroughputState::key_from_time(now)] += 1;
        }
        sampled
    }

    // Every update of the state leaves it consistent, so a panic in another thread while the
    // lock was held does not invalidate it.
    fn lock_state(&self) -> MutexGuard<'_, ThroughputState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sampler for ThroughputSampler {
    fn sample(&self, span: &mut dyn SampledSpan) {
        let sampled = self.sample_at(span.start());
        span.set_sampled(sampled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestSpan;
    use std::thread;

    impl ThroughputSampler {
        fn counter(&self) -> u64 {
            self.lock_state().counter
        }

        fn buffer_sum(&self) -> u64 {
            self.lock_state().counter_buffer.iter().sum()
        }

        fn bucket(&self, tick: i64) -> u64 {
            self.lock_state().counter_buffer[ThroughputState::key_from_time(tick)]
        }
    }

    fn sample_burst(sampler: &ThroughputSampler, start: f64, count: usize) -> usize {
        (0..count)
            .filter(|_| {
                let mut span = TestSpan::new(Some(1), start);
                sampler.sample(&mut span);
                span.sampled.unwrap()
            })
            .count()
    }

    #[test]
    fn check_debug_impl() {
        let sampler = ThroughputSampler::new(5);
        let debug_output = format!("{:?}", sampler);
        assert!(debug_output.contains("ThroughputSampler"));
        assert!(debug_output.contains("buffer_limit: 10"));
        assert!(debug_output.contains("counter: 0"));
    }

    #[test]
    fn test_buffer_limit() {
        assert_eq!(ThroughputSampler::new(0).buffer_limit(), 0);
        assert_eq!(ThroughputSampler::new(5).buffer_limit(), 10);
        assert_eq!(
            ThroughputSampler::new(u32::MAX).buffer_limit(),
            u64::from(u32::MAX) * 2
        );
    }

    #[test]
    fn test_zero_tps_drops_everything() {
        let sampler = ThroughputSampler::new(0);
        assert_eq!(sample_burst(&sampler, 100.0, 10), 0);
        assert_eq!(sampler.counter(), 0);
    }

    #[test]
    fn test_burst_within_one_tick() {
        let sampler = ThroughputSampler::new(5);
        assert_eq!(sample_burst(&sampler, 100.0, 25), 10);
        assert_eq!(sampler.counter(), 10);
        assert_eq!(sampler.bucket(1000), 10);
    }

    #[test]
    fn test_spans_of_the_same_tick_share_a_bucket() {
        let sampler = ThroughputSampler::new(50);
        sample_burst(&sampler, 100.0, 3);
        sample_burst(&sampler, 100.05, 2);
        sample_burst(&sampler, 100.15, 4);

        assert_eq!(sampler.bucket(1000), 5);
        assert_eq!(sampler.bucket(1001), 4);
        assert_eq!(sampler.counter(), 9);
        assert_eq!(sampler.counter(), sampler.buffer_sum());
    }

    #[test]
    fn test_window_expiry() {
        let sampler = ThroughputSampler::new(5);
        assert_eq!(sample_burst(&sampler, 100.0, 25), 10);

        // More than a full window later, every bucket is stale
        assert_eq!(sample_burst(&sampler, 102.5, 1), 1);
        assert_eq!(sampler.counter(), 1);
        assert_eq!(sample_burst(&sampler, 102.5, 25), 9);
        assert_eq!(sampler.counter(), 10);

        // A gap of many windows is handled the same way
        assert_eq!(sample_burst(&sampler, 1_000_000.0, 25), 10);
        assert_eq!(sampler.counter(), sampler.buffer_sum());
    }

    #[test]
    fn test_gradual_expiry() {
        let sampler = ThroughputSampler::new(5);
        assert_eq!(sample_burst(&sampler, 100.0, 10), 10);

        // Last tick still inside the window of tick 1000
        assert_eq!(sample_burst(&sampler, 101.95, 5), 0);
        assert_eq!(sampler.counter(), 10);

        // Tick 1020 reuses, and so expires, the bucket of tick 1000
        assert_eq!(sample_burst(&sampler, 102.0, 15), 10);
        assert_eq!(sampler.counter(), 10);
        assert_eq!(sampler.bucket(1020), 10);
    }

    #[test]
    fn test_sliding_window() {
        let sampler = ThroughputSampler::new(5);
        // 4 traces at tick 1000, 6 at tick 1010
        assert_eq!(sample_burst(&sampler, 100.0, 4), 4);
        assert_eq!(sample_burst(&sampler, 101.0, 10), 6);

        // Tick 1020 only expires tick 1000's bucket
        assert_eq!(sample_burst(&sampler, 102.0, 10), 4);
        assert_eq!(sampler.bucket(1010), 6);
        assert_eq!(sampler.bucket(1020), 4);

        // Tick 1030 expires tick 1010's bucket
        assert_eq!(sample_burst(&sampler, 103.0, 10), 6);
        assert_eq!(sampler.counter(), 10);
        assert_eq!(sampler.counter(), sampler.buffer_sum());
    }

    #[test]
    fn test_clock_regression_does_not_expire() {
        let sampler = ThroughputSampler::new(5);
        assert_eq!(sample_burst(&sampler, 100.0, 10), 10);

        assert_eq!(sample_burst(&sampler, 50.0, 5), 0);
        assert_eq!(sampler.counter(), 10);

        let sampler = ThroughputSampler::new(5);
        assert_eq!(sample_burst(&sampler, 100.0, 4), 4);
        // Late spans are accounted in their own bucket while the window stays at tick 1000
        assert_eq!(sample_burst(&sampler, 99.95, 2), 2);
        assert_eq!(sampler.bucket(999), 2);
        assert_eq!(sampler.counter(), 6);
        assert_eq!(sampler.counter(), sampler.buffer_sum());
    }

    #[test]
    fn test_clones_share_the_window() {
        let sampler = ThroughputSampler::new(5);
        let clone = sampler.clone();
        assert_eq!(sample_burst(&sampler, 100.0, 6), 6);
        assert_eq!(sample_burst(&clone, 100.0, 6), 4);
    }

    #[test]
    fn test_thread_safety() {
        let sampler = ThroughputSampler::new(100);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sampler = sampler.clone();
                thread::spawn(move || sample_burst(&sampler, 100.0, 100))
            })
            .collect();

        let total_kept: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total_kept, 200);
        assert_eq!(sampler.counter(), 200);
        assert_eq!(sampler.counter(), sampler.buffer_sum());
    }
}
