// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Shared constants for the dd-trace-sampling crate

pub use dd_trace::constants::{SAMPLE_RATE_METRIC_KEY, SAMPLING_PRIORITY_TAG};

/// Sampling rate limits
pub mod rate {
    /// Default sampling rate
    pub const DEFAULT_SAMPLE_RATE: f64 = 1.0;
    /// Maximum sampling rate
    pub const MAX_SAMPLE_RATE: f64 = 1.0;
    /// Minimum sampling rate
    pub const MIN_SAMPLE_RATE: f64 = 0.0;
}

/// Numeric constants used in sampling algorithms
pub mod numeric {
    /// Knuth's multiplicative hash factor for deterministic sampling.
    ///
    /// Has to be the same factor as the Agent to allow chained sampling.
    pub const KNUTH_FACTOR: u64 = 1_111_111_111_111_111_111;
    /// Maximum 64-bit unsigned integer value
    pub const MAX_UINT_64BITS: u64 = u64::MAX;
}

/// Sliding window geometry of the throughput sampler
pub mod throughput {
    /// Number of buckets covering one second
    pub const BUCKETS_PER_S: u64 = 10;
    /// Duration of the trailing window, in seconds
    pub const BUFFER_DURATION: u64 = 2;
    /// Number of buckets in the circular buffer
    pub const BUFFER_SIZE: usize = (BUCKETS_PER_S * BUFFER_DURATION) as usize;
}
