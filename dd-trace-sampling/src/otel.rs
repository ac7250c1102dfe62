// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! OpenTelemetry SDK integration
//!
//! The samplers implement [`ShouldSample`] so they can be installed on an
//! `opentelemetry_sdk` tracer provider. Root spans are sampled by the sampler's own algorithm;
//! child spans inherit the decision of their parent, local or remote, without re-evaluating it.

use std::time::SystemTime;

use dd_trace::sampling::SamplingPriority;
use opentelemetry::trace::{
    Link, SamplingDecision, SamplingResult, SpanKind, TraceContextExt, TraceId,
};
use opentelemetry::{Context, KeyValue};
use opentelemetry_sdk::trace::ShouldSample;

use crate::constants::{SAMPLE_RATE_METRIC_KEY, SAMPLING_PRIORITY_TAG};
use crate::{AllSampler, RateSampler, ThroughputSampler};

fn to_decision(sampled: bool) -> SamplingDecision {
    if sampled {
        SamplingDecision::RecordAndSample
    } else {
        SamplingDecision::Drop
    }
}

/// Returns the decision inherited from the parent span, if there is an active one
fn parent_sampling_result(parent_context: Option<&Context>) -> Option<SamplingResult> {
    let parent_ctx = parent_context.filter(|cx| cx.has_active_span())?;
    let span = parent_ctx.span();
    let parent_span_context = span.span_context();
    let sampled = parent_span_context.is_sampled();
    let priority = SamplingPriority::from_sampled(sampled);

    Some(SamplingResult {
        decision: to_decision(sampled),
        attributes: vec![KeyValue::new(
            SAMPLING_PRIORITY_TAG,
            i64::from(priority.into_i8()),
        )],
        trace_state: parent_span_context.trace_state().clone(),
    })
}

/// Datadog trace ids are the lower 64 bits of the 128-bit OpenTelemetry trace id
fn lower_64_bits(trace_id: TraceId) -> u64 {
    u128::from_be_bytes(trace_id.to_bytes()) as u64
}

fn now_seconds() -> f64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

impl ShouldSample for AllSampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        _trace_id: TraceId,
        _name: &str,
        _span_kind: &SpanKind,
        _attributes: &[KeyValue],
        _links: &[Link],
    ) -> SamplingResult {
        parent_sampling_result(parent_context).unwrap_or_else(|| SamplingResult {
            decision: SamplingDecision::RecordAndSample,
            attributes: Vec::new(),
            trace_state: Default::default(),
        })
    }
}

impl ShouldSample for RateSampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        _name: &str,
        _span_kind: &SpanKind,
        _attributes: &[KeyValue],
        _links: &[Link],
    ) -> SamplingResult {
        if let Some(result) = parent_sampling_result(parent_context) {
            return result;
        }

        let sampled = self.sample_trace_id(Some(lower_64_bits(trace_id)));
        SamplingResult {
            decision: to_decision(sampled),
            attributes: vec![KeyValue::new(SAMPLE_RATE_METRIC_KEY, self.sample_rate())],
            trace_state: Default::default(),
        }
    }
}

impl ShouldSample for ThroughputSampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        _trace_id: TraceId,
        _name: &str,
        _span_kind: &SpanKind,
        _attributes: &[KeyValue],
        _links: &[Link],
    ) -> SamplingResult {
        if let Some(result) = parent_sampling_result(parent_context) {
            return result;
        }

        SamplingResult {
            decision: to_decision(self.sample_at(now_seconds())),
            attributes: Vec::new(),
            trace_state: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceState};
    use opentelemetry::Value;

    fn trace_id_from_lower_bits(lower: u64) -> TraceId {
        TraceId::from_bytes(u128::from(lower).to_be_bytes())
    }

    fn sample_root<S: ShouldSample>(sampler: &S, trace_id: TraceId) -> SamplingResult {
        sampler.should_sample(None, trace_id, "", &SpanKind::Client, &[], &[])
    }

    fn parent_context(flags: TraceFlags) -> Context {
        Context::new().with_remote_span_context(SpanContext::new(
            trace_id_from_lower_bits(0xFFFF_0000_0000_0000),
            SpanId::from_bytes([1; 8]),
            flags,
            true,
            TraceState::from_key_value([("dd", "s:1")]).unwrap(),
        ))
    }

    #[test]
    fn test_lower_64_bits() {
        let trace_id = TraceId::from(0x1234_5678_9abc_def0_0fed_cba9_8765_4321_u128);
        assert_eq!(lower_64_bits(trace_id), 0x0fed_cba9_8765_4321);
    }

    #[test]
    fn test_rate_sampler_root_span() {
        let sampler = RateSampler::new(0.5);

        let result = sample_root(&sampler, trace_id_from_lower_bits(0));
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
        assert_eq!(
            result.attributes,
            vec![KeyValue::new(SAMPLE_RATE_METRIC_KEY, 0.5)]
        );

        let result = sample_root(&sampler, trace_id_from_lower_bits(0xFFFF_0000_0000_0000));
        assert_eq!(result.decision, SamplingDecision::Drop);

        // The upper 64 bits are not part of the decision
        let trace_id = TraceId::from(0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000_u128);
        let result = sample_root(&sampler, trace_id);
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
    }

    #[test]
    fn test_parent_decision_is_inherited() {
        let sampler = RateSampler::new(0.5);
        let trace_id = trace_id_from_lower_bits(0xFFFF_0000_0000_0000);

        let cx = parent_context(TraceFlags::SAMPLED);
        let result = sampler.should_sample(Some(&cx), trace_id, "", &SpanKind::Server, &[], &[]);
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
        assert_eq!(
            result.attributes,
            vec![KeyValue::new(SAMPLING_PRIORITY_TAG, 1_i64)]
        );
        assert_eq!(result.trace_state.get("dd"), Some("s:1"));

        let sampler = AllSampler;
        let cx = parent_context(TraceFlags::NOT_SAMPLED);
        let result = sampler.should_sample(Some(&cx), trace_id, "", &SpanKind::Server, &[], &[]);
        assert_eq!(result.decision, SamplingDecision::Drop);
        assert_eq!(
            result.attributes[0].value,
            Value::I64(0),
            "dropped parent should propagate priority 0"
        );
    }

    #[test]
    fn test_context_without_span_is_a_root() {
        let sampler = RateSampler::new(0.5);
        let cx = Context::new();
        let result = sampler.should_sample(
            Some(&cx),
            trace_id_from_lower_bits(0),
            "",
            &SpanKind::Internal,
            &[],
            &[],
        );
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
        assert_eq!(result.attributes[0].key.as_str(), SAMPLE_RATE_METRIC_KEY);
    }

    #[test]
    fn test_all_sampler_root_span() {
        let result = sample_root(&AllSampler, trace_id_from_lower_bits(42));
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
        assert!(result.attributes.is_empty());
    }

    #[test]
    fn test_throughput_sampler_root_span() {
        let sampler = ThroughputSampler::new(1);
        let decisions: Vec<_> = (0..50)
            .map(|_| sample_root(&sampler, trace_id_from_lower_bits(1)).decision)
            .collect();

        let kept = decisions
            .iter()
            .filter(|d| **d == SamplingDecision::RecordAndSample)
            .count();
        // At most two windows are spanned by the loop
        assert!((2..=4).contains(&kept), "kept {kept} traces");
        assert_eq!(decisions[0], SamplingDecision::RecordAndSample);
    }
}
