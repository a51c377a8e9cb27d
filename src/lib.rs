//! Copilot usage survey bot.
//!
//! This crate opens a localized survey issue whenever a pull request is
//! closed, reads the checkbox answers back from issue edits and comments,
//! records them in `PostgreSQL`, and closes the survey once it is answered.
//!
//! # Architecture
//!
//! The survey flow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`survey`]: Survey domain, ports, adapters and orchestration
//! - [`webhook`]: GitHub webhook endpoint
//! - [`config`]: Environment configuration

pub mod config;
pub mod survey;
pub mod webhook;
