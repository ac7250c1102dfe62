// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Metric holding the rate applied by a rate sampler, used by the backend to
/// reconstruct the weight of each kept trace.
pub const SAMPLE_RATE_METRIC_KEY: &str = "_sample_rate";
/// Metric holding the sampling priority of a trace whose decision was propagated.
pub const SAMPLING_PRIORITY_TAG: &str = "_sampling_priority_v1";
