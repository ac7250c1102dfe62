// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-memory spans for exercising samplers in tests and benchmarks

use std::collections::HashMap;

use dd_trace::sampling::SamplingPriority;

use crate::types::{SampledSpan, SpanMetrics, SpanPriority};

/// Span recording everything the samplers write to it
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestSpan {
    pub trace_id: Option<u64>,
    pub start: f64,
    pub sampled: Option<bool>,
    pub metrics: HashMap<String, f64>,
    pub sampling_priority: Option<SamplingPriority>,
}

impl TestSpan {
    pub fn new(trace_id: Option<u64>, start: f64) -> Self {
        TestSpan {
            trace_id,
            start,
            ..Default::default()
        }
    }
}

impl SpanMetrics for TestSpan {
    fn set_metric(&mut self, key: &str, value: f64) {
        self.metrics.insert(key.to_string(), value);
    }
}

impl SampledSpan for TestSpan {
    fn trace_id(&self) -> Option<u64> {
        self.trace_id
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn set_sampled(&mut self, sampled: bool) {
        self.sampled = Some(sampled);
    }

    fn metrics_mut(&mut self) -> Option<&mut dyn SpanMetrics> {
        Some(self)
    }
}

impl SpanPriority for TestSpan {
    fn set_sampling_priority(&mut self, priority: SamplingPriority) {
        self.sampling_priority = Some(priority);
    }
}

/// Span without the tagging capability
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UntaggedSpan {
    pub trace_id: Option<u64>,
    pub start: f64,
    pub sampled: Option<bool>,
}

impl SampledSpan for UntaggedSpan {
    fn trace_id(&self) -> Option<u64> {
        self.trace_id
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn set_sampled(&mut self, sampled: bool) {
        self.sampled = Some(sampled);
    }
}
