//! Given steps for survey lifecycle BDD scenarios.

use super::when::close_pull_request;
use super::world::SurveyWorld;
use copilot_survey::survey::domain::RepositoryRef;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the repository "{name}" owned by "{owner}""#)]
fn repository_named(
    world: &mut SurveyWorld,
    name: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let repository =
        RepositoryRef::new(owner, name).wrap_err("build scenario repository reference")?;
    world.repository_ref = Some(repository);
    Ok(())
}

#[given(r#"the language service detects "{code}""#)]
fn language_service_detects(world: &mut SurveyWorld, code: String) {
    world.detected_language = code;
}

#[given(r#"pull request {number:u64} by "{author}" was closed"#)]
fn pull_request_was_closed(
    world: &mut SurveyWorld,
    number: u64,
    author: String,
) -> Result<(), eyre::Report> {
    close_pull_request(world, number, author, "Fix the release build".to_owned())
}
