// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use dd_trace::sampling::SamplingPriority;

use crate::types::{SampledSpan, SpanPriority};

/// Holds the sampled decision of a distributed trace.
///
/// Distributed sampling and sampling are two different things. With local sampling, the
/// decision only tells whether the trace is sent to the Agent. In distributed tracing, the
/// root span takes the decision once and it is propagated unchanged to all the child spans, in
/// every service the trace goes through.
///
/// To keep both visibly distinct, the decision is not written as the local keep flag but as a
/// sampling priority: [`priority::AUTO_KEEP`](dd_trace::sampling::priority::AUTO_KEEP) (1) to
/// keep, [`priority::AUTO_REJECT`](dd_trace::sampling::priority::AUTO_REJECT) (0) to drop.
///
/// `DistributedSampled` is also a [`SampledSpan`] without trace id nor metrics, so any sampler
/// can take the root decision through it:
///
/// ```
/// use dd_trace::sampling::{priority, SamplingPriority};
/// use dd_trace_sampling::{DistributedSampled, RateSampler, SampledSpan, Sampler, SpanPriority};
///
/// #[derive(Default)]
/// struct RootSpan {
///     priority: Option<SamplingPriority>,
/// }
///
/// impl SpanPriority for RootSpan {
///     fn set_sampling_priority(&mut self, priority: SamplingPriority) {
///         self.priority = Some(priority);
///     }
/// }
///
/// impl SampledSpan for RootSpan {
///     fn trace_id(&self) -> Option<u64> {
///         Some(7)
///     }
///
///     fn start(&self) -> f64 {
///         0.0
///     }
///
///     fn set_sampled(&mut self, _sampled: bool) {}
/// }
///
/// let mut root = RootSpan::default();
/// RateSampler::new(1.0).sample(&mut DistributedSampled::new(&mut root));
/// assert_eq!(root.priority, Some(priority::AUTO_KEEP));
/// ```
#[derive(Debug)]
pub struct DistributedSampled<'a, S: ?Sized> {
    span: &'a mut S,
}

impl<'a, S: SpanPriority + ?Sized> DistributedSampled<'a, S> {
    /// Creates a sampling proxy referring to `span`.
    pub fn new(span: &'a mut S) -> Self {
        DistributedSampled { span }
    }

    /// Writes the propagated decision to the span as a sampling priority.
    pub fn set_sampled(&mut self, sampled: bool) {
        self.span
            .set_sampling_priority(SamplingPriority::from_sampled(sampled));
    }
}

impl<S: SampledSpan + SpanPriority + ?Sized> SampledSpan for DistributedSampled<'_, S> {
    // The decision is taken once for the whole trace, there is no point in making it
    // reproducible.
    fn trace_id(&self) -> Option<u64> {
        None
    }

    fn start(&self) -> f64 {
        self.span.start()
    }

    fn set_sampled(&mut self, sampled: bool) {
        self.span
            .set_sampling_priority(SamplingPriority::from_sampled(sampled));
    }
}
