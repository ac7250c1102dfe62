// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Client-side trace sampling
//!
//! Samplers decide whether a trace is kept before it leaves the process:
//! - [`AllSampler`] keeps everything
//! - [`RateSampler`] keeps a deterministic fraction of the traces, based on the trace id
//! - [`ThroughputSampler`] keeps up to a number of traces per second
//!
//! [`DistributedSampled`] redirects a sampler's decision to the sampling priority propagated
//! along a distributed trace.

pub mod config;
pub mod constants;
pub mod distributed;
pub mod otel;
pub mod rate_sampler;
pub mod sampler;
pub mod throughput_sampler;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports for convenient usage
pub use config::{SamplerConfig, SamplerKind};
pub use distributed::DistributedSampled;
pub use rate_sampler::RateSampler;
pub use sampler::{AllSampler, Sampler};
pub use throughput_sampler::ThroughputSampler;
pub use types::{SampledSpan, SpanMetrics, SpanPriority};
