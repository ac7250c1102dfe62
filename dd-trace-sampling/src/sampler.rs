// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use crate::types::SampledSpan;

/// Client-side sampling decision.
///
/// Implementations inspect a span and mark it as kept or dropped. Decisions run inline on the
/// thread producing the span: they never block on I/O and never fail, every abnormal input
/// degrades to a defined fallback.
///
/// A configured sampler is usually shared by all the threads of the process, hence the
/// `Send + Sync` bound and the `&self` receiver.
pub trait Sampler: fmt::Debug + Send + Sync {
    /// Marks `span` as kept or dropped.
    ///
    /// Calling it twice on the same span is not guaranteed to yield the same decision.
    fn sample(&self, span: &mut dyn SampledSpan);
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample(&self, span: &mut dyn SampledSpan) {
        (**self).sample(span)
    }
}

impl<S: Sampler + ?Sized> Sampler for Arc<S> {
    fn sample(&self, span: &mut dyn SampledSpan) {
        (**self).sample(span)
    }
}

/// Sampler sampling all the traces
#[derive(Debug, Default, Clone, Copy)]
pub struct AllSampler;

impl Sampler for AllSampler {
    fn sample(&self, span: &mut dyn SampledSpan) {
        span.set_sampled(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestSpan;

    #[test]
    fn test_all_sampler_keeps_everything() {
        let sampler = AllSampler;
        for trace_id in [None, Some(0), Some(1), Some(u64::MAX)] {
            let mut span = TestSpan::new(trace_id, 0.0);
            sampler.sample(&mut span);
            assert_eq!(span.sampled, Some(true));
            assert!(span.metrics.is_empty());
        }
    }

    #[test]
    fn test_shared_sampler() {
        let sampler: Arc<dyn Sampler> = Arc::new(AllSampler);
        let boxed: Box<dyn Sampler> = Box::new(sampler.clone());

        let mut span = TestSpan::new(Some(42), 0.0);
        boxed.sample(&mut span);
        assert_eq!(span.sampled, Some(true));
    }
}
