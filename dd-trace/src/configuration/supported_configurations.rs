// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Configuration keys the tracer reads from its sources
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SupportedConfigurations {
    DD_LOG_LEVEL,
    DD_TRACE_RATE_LIMIT,
    DD_TRACE_SAMPLE_RATE,
}

impl SupportedConfigurations {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            SupportedConfigurations::DD_LOG_LEVEL => "DD_LOG_LEVEL",
            SupportedConfigurations::DD_TRACE_RATE_LIMIT => "DD_TRACE_RATE_LIMIT",
            SupportedConfigurations::DD_TRACE_SAMPLE_RATE => "DD_TRACE_SAMPLE_RATE",
        }
    }
}
