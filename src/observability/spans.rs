//! Structured span definitions for tracing.

use std::path::Path;

use tracing::{Level, Span, span};

use crate::plugins::RootKind;

/// Tracing configuration.
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub enabled: bool,
    pub level: TracingLevel,
    /// Show event targets in console output.
    pub with_target: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingLevel {
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl TracingLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            TracingLevel::Warn => "warn",
            TracingLevel::Info => "info",
            TracingLevel::Debug => "debug",
            TracingLevel::Trace => "trace",
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self {
            enabled: true,
            with_target: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }
}

/// Span wrapping one scan of `root`.
pub fn scan_span(root: &Path, kind: RootKind) -> Span {
    span!(
        Level::INFO,
        "plugins.scan",
        root = %root.display(),
        root_kind = kind.as_str(),
        otel.name = "plugins.scan",
    )
}
