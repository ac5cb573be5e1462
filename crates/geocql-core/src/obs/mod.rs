//! Observability: parse and scan counters behind a sink boundary.
//!
//! Parser and cursor code only emit `MetricsEvent`s; the counters live in
//! `metrics` and are never touched directly from outside this module.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
