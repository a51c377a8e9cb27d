//! Telemetry sink writing every item as a structured tracing event.

use crate::survey::ports::{DependencyTelemetry, ExceptionTelemetry, Telemetry, TelemetryEvent};

/// Telemetry adapter emitting events under the `telemetry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn track_event(&self, event: TelemetryEvent) {
        tracing::info!(
            target: "telemetry",
            name = %event.name,
            properties = %event.properties,
            "event"
        );
    }

    fn track_dependency(&self, dependency: DependencyTelemetry) {
        tracing::info!(
            target: "telemetry",
            dependency = %dependency.target,
            name = %dependency.name,
            kind = dependency.kind.as_str(),
            duration_ms = dependency.duration.num_milliseconds(),
            success = dependency.success,
            "dependency"
        );
    }

    fn track_exception(&self, exception: ExceptionTelemetry) {
        tracing::warn!(
            target: "telemetry",
            operation = %exception.operation,
            error = %exception.message,
            "exception"
        );
    }
}
