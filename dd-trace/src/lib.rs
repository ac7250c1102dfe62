// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Shared building blocks of the Datadog tracer: configuration, logging, errors and the
//! sampling priority types propagated with distributed traces.

pub mod configuration;
pub mod constants;
pub use configuration::{Config, ConfigBuilder};

mod error;
pub use error::{Error, Result};

pub mod log;
pub mod sampling;
