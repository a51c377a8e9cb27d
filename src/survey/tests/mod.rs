//! Unit tests for the survey bounded context.

mod language_tests;
mod repository_tests;
mod template_tests;
