// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Capabilities a span must expose to be sampled

use dd_trace::sampling::SamplingPriority;

/// A trait for the span data the samplers read and write.
///
/// The sampler only needs the trace identifier, the span start time and a way to record its
/// decision. Everything else about the span is owned by the instrumentation.
///
/// # Examples
///
/// ```
/// use dd_trace_sampling::{SampledSpan, SpanMetrics};
/// use std::collections::HashMap;
///
/// struct MySpan {
///     trace_id: u64,
///     start: f64,
///     sampled: bool,
///     metrics: HashMap<String, f64>,
/// }
///
/// impl SpanMetrics for MySpan {
///     fn set_metric(&mut self, key: &str, value: f64) {
///         self.metrics.insert(key.to_string(), value);
///     }
/// }
///
/// impl SampledSpan for MySpan {
///     fn trace_id(&self) -> Option<u64> {
///         Some(self.trace_id)
///     }
///
///     fn start(&self) -> f64 {
///         self.start
///     }
///
///     fn set_sampled(&mut self, sampled: bool) {
///         self.sampled = sampled;
///     }
///
///     fn metrics_mut(&mut self) -> Option<&mut dyn SpanMetrics> {
///         Some(self)
///     }
/// }
/// ```
pub trait SampledSpan {
    /// Returns the 64-bit trace identifier, if the span belongs to an identified trace.
    ///
    /// Spans without an identifier are still sampled, but not reproducibly.
    fn trace_id(&self) -> Option<u64>;

    /// Returns the span start time, in seconds.
    ///
    /// Only the throughput sampler reads it, to bucket the span into its time window.
    fn start(&self) -> f64;

    /// Records the keep (`true`) or drop (`false`) decision.
    fn set_sampled(&mut self, sampled: bool);

    /// Returns the tagging capability of the span, if it has one.
    ///
    /// Samplers use it to annotate the span on a best-effort basis: when this returns `None`
    /// the annotation is skipped and the decision is unaffected.
    fn metrics_mut(&mut self) -> Option<&mut dyn SpanMetrics> {
        None
    }
}

/// A trait for spans that carry numeric tags.
pub trait SpanMetrics {
    /// Sets the numeric tag `key` to `value`, replacing any previous value.
    fn set_metric(&mut self, key: &str, value: f64);
}

/// A trait for spans that carry a propagated sampling priority.
pub trait SpanPriority {
    /// Records a sampling decision made upstream in the distributed trace.
    fn set_sampling_priority(&mut self, priority: SamplingPriority);
}
