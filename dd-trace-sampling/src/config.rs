// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use dd_trace::{dd_error, Config};
use serde::{Deserialize, Serialize};

use crate::constants::rate;
use crate::{AllSampler, RateSampler, Sampler, ThroughputSampler};

/// The sampling algorithm to use
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// Keep every trace
    #[default]
    All,
    /// Keep a fraction of the traces, see [`RateSampler`]
    Rate,
    /// Keep up to a number of traces per second, see [`ThroughputSampler`]
    Throughput,
}

/// Configuration of the client-side sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Which sampler to build
    #[serde(default)]
    pub sampler: SamplerKind,

    /// The sample rate of the rate sampler (0.0-1.0)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Maximum number of traces kept per second by the throughput sampler
    #[serde(default)]
    pub rate_limit: Option<u32>,
}

fn default_sample_rate() -> f64 {
    rate::DEFAULT_SAMPLE_RATE
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            sampler: SamplerKind::default(),
            sample_rate: default_sample_rate(),
            rate_limit: None,
        }
    }
}

impl SamplerConfig {
    /// Create a configuration for a rate sampler
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        SamplerConfig {
            sampler: SamplerKind::Rate,
            sample_rate,
            rate_limit: None,
        }
    }

    /// Create a configuration for a throughput sampler
    pub fn with_rate_limit(rate_limit: u32) -> Self {
        SamplerConfig {
            sampler: SamplerKind::Throughput,
            sample_rate: default_sample_rate(),
            rate_limit: Some(rate_limit),
        }
    }

    /// Derive the sampler configuration from the tracer configuration.
    ///
    /// A rate limit selects the throughput sampler, otherwise a sample rate selects the rate
    /// sampler. Without either, every trace is kept.
    pub fn from_config(config: &Config) -> Self {
        match (config.trace_rate_limit(), config.trace_sample_rate()) {
            (Some(rate_limit), _) => Self::with_rate_limit(rate_limit),
            (None, Some(sample_rate)) => Self::with_sample_rate(sample_rate),
            (None, None) => Self::default(),
        }
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> dd_trace::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| dd_trace::Error::from(e).context("invalid sampler configuration"))
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> dd_trace::Result<String> {
        serde_json::to_string(self)
            .map_err(|e| dd_trace::Error::from(e).context("cannot serialize sampler configuration"))
    }

    /// Create the sampler described by this configuration
    pub fn build_sampler(&self) -> Box<dyn Sampler> {
        match self.sampler {
            SamplerKind::All => Box::new(AllSampler),
            SamplerKind::Rate => Box::new(RateSampler::new(self.sample_rate)),
            SamplerKind::Throughput => match self.rate_limit {
                Some(rate_limit) => Box::new(ThroughputSampler::new(rate_limit)),
                None => {
                    dd_error!(
                        "SamplerConfig: rate_limit missing for the throughput sampler, {}",
                        "sampling all traces"
                    );
                    Box::new(AllSampler)
                }
            },
        }
    }
}
