//! Telemetry sink that keeps every item for later inspection.

use std::sync::{Arc, Mutex};

use crate::survey::ports::{DependencyTelemetry, ExceptionTelemetry, Telemetry, TelemetryEvent};

/// Item captured by [`RecordingTelemetry`].
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryItem {
    /// A tracked event.
    Event(TelemetryEvent),
    /// A tracked dependency call.
    Dependency(DependencyTelemetry),
    /// A tracked exception.
    Exception(ExceptionTelemetry),
}

/// Telemetry sink recording items in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    items: Arc<Mutex<Vec<TelemetryItem>>>,
}

impl RecordingTelemetry {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded item in arrival order.
    #[must_use]
    pub fn items(&self) -> Vec<TelemetryItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    /// Returns the recorded exceptions.
    #[must_use]
    pub fn exceptions(&self) -> Vec<ExceptionTelemetry> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                TelemetryItem::Exception(exception) => Some(exception),
                TelemetryItem::Event(_) | TelemetryItem::Dependency(_) => None,
            })
            .collect()
    }

    /// Returns the recorded dependency calls.
    #[must_use]
    pub fn dependencies(&self) -> Vec<DependencyTelemetry> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                TelemetryItem::Dependency(dependency) => Some(dependency),
                TelemetryItem::Event(_) | TelemetryItem::Exception(_) => None,
            })
            .collect()
    }

    fn push(&self, item: TelemetryItem) {
        if let Ok(mut items) = self.items.lock() {
            items.push(item);
        }
    }
}

impl Telemetry for RecordingTelemetry {
    fn track_event(&self, event: TelemetryEvent) {
        self.push(TelemetryItem::Event(event));
    }

    fn track_dependency(&self, dependency: DependencyTelemetry) {
        self.push(TelemetryItem::Dependency(dependency));
    }

    fn track_exception(&self, exception: ExceptionTelemetry) {
        self.push(TelemetryItem::Exception(exception));
    }
}
