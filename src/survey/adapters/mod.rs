//! Adapter implementations for survey ports.

pub mod github;
pub mod memory;
pub mod postgres;
pub mod telemetry;
pub mod templates;
pub mod text_analytics;
