// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;

use dd_trace::{dd_error, dd_info};
use rand::{Rng, SeedableRng};

use crate::constants::{numeric, rate, SAMPLE_RATE_METRIC_KEY};
use crate::sampler::Sampler;
use crate::types::SampledSpan;
use numeric::{KNUTH_FACTOR, MAX_UINT_64BITS};

thread_local! {
    static RNG: RefCell<rand::rngs::SmallRng> = RefCell::new(rand::rngs::SmallRng::from_entropy());
}

/// Sampler based on a rate.
///
/// Keeps (100 * `sample_rate`)% of the traces. The decision only depends on the trace id and
/// the rate, so every process sampling the same trace at the same rate reaches the same
/// decision. Its main purpose is to reduce the instrumentation footprint.
#[derive(Clone)]
pub struct RateSampler {
    sample_rate: f64,
    sampling_id_threshold: u64,
}

impl fmt::Debug for RateSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateSampler")
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl RateSampler {
    // Helper method to calculate the threshold from a rate
    fn calculate_threshold(rate: f64) -> u64 {
        if rate >= rate::MAX_SAMPLE_RATE {
            MAX_UINT_64BITS
        } else {
            (rate * (MAX_UINT_64BITS as f64)) as u64
        }
    }

    // A rate that is not strictly positive would drop every trace, which is never what a
    // misconfigured service wants: sample everything instead.
    fn sanitize_rate(sample_rate: f64) -> f64 {
        if sample_rate.is_nan() || sample_rate <= rate::MIN_SAMPLE_RATE {
            dd_error!(
                "RateSampler: sample_rate is negative or null ({}), disable the sampler",
                sample_rate
            );
            rate::MAX_SAMPLE_RATE
        } else {
            sample_rate.min(rate::MAX_SAMPLE_RATE)
        }
    }

    /// Creates a new `RateSampler`.
    ///
    /// A `sample_rate` above 1.0 is clamped to 1.0. A `sample_rate` of 0.0 or below is
    /// reported and replaced by 1.0.
    pub fn new(sample_rate: f64) -> Self {
        let sample_rate = Self::sanitize_rate(sample_rate);
        let sampler = RateSampler {
            sample_rate,
            sampling_id_threshold: Self::calculate_threshold(sample_rate),
        };
        dd_info!(
            "RateSampler: initialized, sample {}% of traces",
            100.0 * sample_rate
        );
        sampler
    }

    /// Returns the current sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sets a new sample rate for the sampler, with the same sanitizing as [`RateSampler::new`].
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        let sample_rate = Self::sanitize_rate(sample_rate);
        self.sample_rate = sample_rate;
        self.sampling_id_threshold = Self::calculate_threshold(sample_rate);
    }

    /// Returns whether a trace with the given id is kept at the current rate.
    ///
    /// Without a trace id there is nothing to be consistent with, a random id is drawn instead.
    pub fn sample_trace_id(&self, trace_id: Option<u64>) -> bool {
        let processed_id = match trace_id {
            Some(trace_id) => trace_id.wrapping_mul(KNUTH_FACTOR),
            None => RNG.with(|rng| rng.borrow_mut().gen::<u64>()),
        };
        processed_id <= self.sampling_id_threshold
    }
}

impl Sampler for RateSampler {
    fn sample(&self, span: &mut dyn SampledSpan) {
        span.set_sampled(self.sample_trace_id(span.trace_id()));
        if let Some(metrics) = span.metrics_mut() {
            metrics.set_metric(SAMPLE_RATE_METRIC_KEY, self.sample_rate);
        }
    }
}
