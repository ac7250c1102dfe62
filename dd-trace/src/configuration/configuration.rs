// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::log::LevelFilter;

use super::{
    sources::{CompositeConfigSourceResult, CompositeSource},
    supported_configurations::SupportedConfigurations,
};

#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
/// Configuration of the client-side sampling
///
/// # Usage
/// ```
/// use dd_trace::Config;
///
/// // This pulls configuration from the environment
/// let mut builder = Config::builder();
///
/// // Manual overrides
/// builder.set_trace_sample_rate(0.5);
///
/// // Finalize the configuration
/// let config = builder.build();
/// assert_eq!(config.trace_sample_rate(), Some(0.5));
/// ```
pub struct Config {
    /// Fraction of traces kept by the rate sampler
    trace_sample_rate: Option<f64>,
    /// Maximum number of traces to keep per second, per process.
    /// Selects the throughput sampler when set.
    trace_rate_limit: Option<u32>,
    /// The log level for the tracer
    log_level: LevelFilter,
}

impl Config {
    fn from_sources(sources: &CompositeSource) -> Self {
        let default = Config::default();

        /// Converts a CompositeConfigSourceResult<T> into an Option<T>, logging the values that
        /// were found but could not be parsed
        fn to_val<T>(res: CompositeConfigSourceResult<T>) -> Option<T> {
            for error in &res.errors {
                crate::dd_warn!("Config: ignoring {}: {}", res.name.as_str(), error);
            }
            res.value.map(|c| c.value)
        }

        Self {
            trace_sample_rate: to_val(
                sources.get_parse(SupportedConfigurations::DD_TRACE_SAMPLE_RATE),
            )
            .or(default.trace_sample_rate),
            trace_rate_limit: to_val(
                sources.get_parse(SupportedConfigurations::DD_TRACE_RATE_LIMIT),
            )
            .or(default.trace_rate_limit),
            log_level: to_val(sources.get_parse(SupportedConfigurations::DD_LOG_LEVEL))
                .unwrap_or(default.log_level),
        }
    }

    fn builder_with_sources(sources: &CompositeSource) -> ConfigBuilder {
        ConfigBuilder {
            config: Config::from_sources(sources),
        }
    }

    /// Creates a new builder to set overrides detected configuration
    pub fn builder() -> ConfigBuilder {
        Self::builder_with_sources(&CompositeSource::default_sources())
    }

    /// Builder starting from the defaults, ignoring the environment. Not exposed to customer
    #[cfg(feature = "test-utils")]
    pub fn __internal_builder_without_env() -> ConfigBuilder {
        Self::builder_with_sources(&CompositeSource::new())
    }

    pub fn trace_sample_rate(&self) -> Option<f64> {
        self.trace_sample_rate
    }

    pub fn trace_rate_limit(&self) -> Option<u32> {
        self.trace_rate_limit
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Finalizes the builder, applies the log level and returns the configuration
    pub fn build(self) -> Config {
        crate::log::set_max_level(self.config.log_level);
        self.config
    }

    pub fn set_trace_sample_rate(&mut self, sample_rate: f64) -> &mut Self {
        self.config.trace_sample_rate = Some(sample_rate);
        self
    }

    pub fn set_trace_rate_limit(&mut self, rate_limit: u32) -> &mut Self {
        self.config.trace_rate_limit = Some(rate_limit);
        self
    }

    pub fn set_log_level(&mut self, log_level: LevelFilter) -> &mut Self {
        self.config.log_level = log_level;
        self
    }
}
