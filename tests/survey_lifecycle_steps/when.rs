//! When steps for survey lifecycle BDD scenarios.

use super::world::{OpenSurvey, SurveyWorld, run_async};
use copilot_survey::survey::{
    domain::PullRequestNumber,
    services::{ClosedPullRequest, PullRequestClosedOutcome},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

/// Closes a pull request and remembers the survey issue it opened.
pub fn close_pull_request(
    world: &mut SurveyWorld,
    number: u64,
    author: String,
    description: String,
) -> Result<(), eyre::Report> {
    let pull_request = ClosedPullRequest {
        repository: world.repository_ref()?,
        number: PullRequestNumber::new(number).wrap_err("scenario pull request number")?,
        body: Some(description),
        author_login: Some(author.clone()),
        enterprise_name: None,
    };
    let outcome = run_async(world.service()?.handle_pull_request_closed(pull_request))
        .wrap_err("handle closed pull request")?;
    let PullRequestClosedOutcome::SurveyOpened { issue_number, .. } = outcome else {
        return Err(eyre::eyre!("expected an opened survey, got {outcome:?}"));
    };

    let issue = world
        .tracker
        .created()
        .into_iter()
        .find(|created| created.number == issue_number)
        .ok_or_else(|| eyre::eyre!("tracker has no issue #{issue_number}"))?;
    let (_, opened) = world
        .tracker
        .opened()
        .into_iter()
        .find(|(opened_number, _)| *opened_number == issue_number)
        .ok_or_else(|| eyre::eyre!("tracker has no request for issue #{issue_number}"))?;

    world.survey = Some(OpenSurvey {
        issue,
        title: opened.title,
        body: opened.body,
        author,
    });
    Ok(())
}

#[when(r#"pull request {number:u64} by "{author}" is closed with description "{description}""#)]
fn pull_request_is_closed(
    world: &mut SurveyWorld,
    number: u64,
    author: String,
    description: String,
) -> Result<(), eyre::Report> {
    close_pull_request(world, number, author, description)
}

#[when(r#"the author ticks "{option}""#)]
fn author_ticks(world: &mut SurveyWorld, option: String) -> Result<(), eyre::Report> {
    let unticked = format!("- [ ] {option}");
    let survey = world
        .survey
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing survey issue in scenario world"))?;
    if !survey.body.contains(&unticked) {
        return Err(eyre::eyre!("survey has no unticked option {option:?}"));
    }
    survey.body = survey.body.replacen(&unticked, &format!("- [x] {option}"), 1);

    let update = world.survey_update(None)?;
    world.last_update = Some(run_async(world.service()?.handle_survey_update(update)));
    Ok(())
}

#[when(r#"the author comments "{comment}""#)]
fn author_comments(world: &mut SurveyWorld, comment: String) -> Result<(), eyre::Report> {
    let update = world.survey_update(Some(comment))?;
    world.last_update = Some(run_async(world.service()?.handle_survey_update(update)));
    Ok(())
}

#[when("the author edits the survey without ticking anything")]
fn author_edits_without_ticking(world: &mut SurveyWorld) -> Result<(), eyre::Report> {
    let update = world.survey_update(None)?;
    world.last_update = Some(run_async(world.service()?.handle_survey_update(update)));
    Ok(())
}
