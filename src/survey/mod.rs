//! Usage survey lifecycle.
//!
//! A closed pull request opens a survey issue written in the language of its
//! description. Answers ticked on that issue, or given in comments, are
//! parsed and recorded, and the survey is closed once the answer is
//! definitive. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
