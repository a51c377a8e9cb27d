//! `PostgreSQL` adapters for survey result persistence.

mod connection;
mod models;
mod repository;
mod schema;

pub use repository::{PostgresSurveyRepository, SURVEY_SCHEMA_SQL, SurveyPgPool};
