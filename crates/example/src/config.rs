//! Demo configuration, read from the environment.

use core::fmt;

use pareto_graph::SearchLimits;

use crate::logging::{TracingConfig, TracingFormat};

/// Filter directive variable.
pub const LOG_VAR: &str = "PARETO_LOG";
/// Output format variable (`pretty`, `compact` or `json`).
pub const LOG_FORMAT_VAR: &str = "PARETO_LOG_FORMAT";
/// Span events toggle (`1`/`true`).
pub const LOG_SPANS_VAR: &str = "PARETO_LOG_SPANS";
/// Terminal graph cap.
pub const MAX_TERMINALS_VAR: &str = "PARETO_MAX_TERMINALS";
/// Fusion cap.
pub const MAX_FUSIONS_VAR: &str = "PARETO_MAX_FUSIONS";

/// A variable whose value was rejected while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Variable name.
    pub key: &'static str,
    /// Raw value as found in the environment.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring {}={:?}: {}", self.key, self.value, self.reason)
    }
}

/// Settings for the demo binary.
#[derive(Debug, Clone, Default)]
pub struct DemoConfig {
    /// Subscriber settings.
    pub tracing: TracingConfig,
    /// Search budgets.
    pub limits: SearchLimits,
    /// Rejected values, kept until a subscriber can report them.
    pub warnings: Vec<ConfigWarning>,
}

impl DemoConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults. Invalid values are ignored and
    /// collected in [`warnings`](Self::warnings).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_VAR) {
            config.tracing = config.tracing.with_env_filter(filter);
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            match TracingFormat::parse(&format) {
                Some(format) => config.tracing = config.tracing.with_format(format),
                None => config.warnings.push(ConfigWarning {
                    key: LOG_FORMAT_VAR,
                    value: format,
                    reason: "expected pretty, compact or json".to_string(),
                }),
            }
        }
        if let Some(spans) = lookup(LOG_SPANS_VAR) {
            let enabled = matches!(spans.trim(), "1" | "true" | "yes");
            config.tracing = config.tracing.with_span_events(enabled);
        }
        if let Some(limit) = parse_limit(&lookup, MAX_TERMINALS_VAR, &mut config.warnings) {
            config.limits = config.limits.with_max_terminals(limit);
        }
        if let Some(limit) = parse_limit(&lookup, MAX_FUSIONS_VAR, &mut config.warnings) {
            config.limits = config.limits.with_max_fusions(limit);
        }

        config
    }

    /// Logs every rejected value at `warn` level.
    ///
    /// Call this after the subscriber is installed, otherwise the events are
    /// lost.
    pub fn report_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(
                key = warning.key,
                value = %warning.value,
                reason = %warning.reason,
                "ignoring invalid configuration value"
            );
        }
    }
}

fn parse_limit(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    warnings: &mut Vec<ConfigWarning>,
) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(limit) => Some(limit),
        Err(err) => {
            warnings.push(ConfigWarning {
                key,
                value: raw,
                reason: err.to_string(),
            });
            None
        }
    }
}
