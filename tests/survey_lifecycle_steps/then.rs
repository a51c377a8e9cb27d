//! Then steps for survey lifecycle BDD scenarios.

use super::world::{SurveyWorld, run_async};
use copilot_survey::survey::{
    domain::{PullRequestNumber, SurveyRecord},
    ports::SurveyRepository,
    services::SurveyUpdateOutcome,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn stored_record(world: &SurveyWorld) -> Result<SurveyRecord, eyre::Report> {
    let survey = world.open_survey()?;
    run_async(world.repository.find_by_issue_id(survey.issue.id))
        .wrap_err("look up survey record")?
        .ok_or_else(|| eyre::eyre!("no survey record for issue #{}", survey.issue.number))
}

fn survey_is_closed(world: &SurveyWorld) -> Result<bool, eyre::Report> {
    let survey = world.open_survey()?;
    Ok(world
        .tracker
        .closed()
        .iter()
        .any(|(_, number)| *number == survey.issue.number))
}

#[then(r#"a survey issue titled "{title}" is assigned to "{author}""#)]
fn survey_issue_titled(
    world: &SurveyWorld,
    title: String,
    author: String,
) -> Result<(), eyre::Report> {
    let opened = world.tracker.opened();
    let (_, issue) = opened
        .first()
        .ok_or_else(|| eyre::eyre!("no survey issue was opened"))?;
    if issue.title != title {
        return Err(eyre::eyre!("expected title {title:?}, found {:?}", issue.title));
    }
    if issue.assignee.as_deref() != Some(author.as_str()) {
        return Err(eyre::eyre!(
            "expected assignee {author:?}, found {:?}",
            issue.assignee
        ));
    }
    Ok(())
}

#[then(r#"the survey issue offers the option "{option}""#)]
fn survey_offers_option(world: &SurveyWorld, option: String) -> Result<(), eyre::Report> {
    let survey = world.open_survey()?;
    if !survey.body.contains(&format!("- [ ] {option}")) {
        return Err(eyre::eyre!(
            "survey body lacks option {option:?}:\n{}",
            survey.body
        ));
    }
    Ok(())
}

#[then("a pending survey record exists for pull request {number:u64}")]
fn pending_record_exists(world: &SurveyWorld, number: u64) -> Result<(), eyre::Report> {
    let record = stored_record(world)?;
    let expected = PullRequestNumber::new(number).wrap_err("scenario pull request number")?;
    if record.pr_number != expected {
        return Err(eyre::eyre!(
            "expected pull request {expected}, found {}",
            record.pr_number
        ));
    }
    if record.assistant_used.is_some() {
        return Err(eyre::eyre!("expected a pending record, got {record:?}"));
    }
    Ok(())
}

#[then("the survey issue is closed")]
fn survey_issue_is_closed(world: &SurveyWorld) -> Result<(), eyre::Report> {
    if !survey_is_closed(world)? {
        return Err(eyre::eyre!("survey issue is still open"));
    }
    Ok(())
}

#[then("the survey issue stays open")]
fn survey_issue_stays_open(world: &SurveyWorld) -> Result<(), eyre::Report> {
    if survey_is_closed(world)? {
        return Err(eyre::eyre!("survey issue was closed"));
    }
    Ok(())
}

#[then(r#"the survey record shows usage "{bucket}""#)]
fn record_shows_usage(world: &SurveyWorld, bucket: String) -> Result<(), eyre::Report> {
    let record = stored_record(world)?;
    let stored = record.usage_percentage.as_ref().map(|usage| usage.to_storage());
    if record.assistant_used != Some(true) || stored.as_deref() != Some(bucket.as_str()) {
        return Err(eyre::eyre!("expected usage {bucket:?}, got {record:?}"));
    }
    Ok(())
}

#[then(r#"the survey record shows non-use reason "{reason}""#)]
fn record_shows_reason(world: &SurveyWorld, reason: String) -> Result<(), eyre::Report> {
    let record = stored_record(world)?;
    if record.assistant_used != Some(false)
        || record.non_use_reason.as_deref() != Some(reason.as_str())
    {
        return Err(eyre::eyre!("expected non-use reason {reason:?}, got {record:?}"));
    }
    Ok(())
}

#[then("nothing is recorded for the edit")]
fn nothing_recorded(world: &SurveyWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing survey update outcome"))?;
    if !matches!(outcome, SurveyUpdateOutcome::NothingToRecord { .. }) {
        return Err(eyre::eyre!("expected nothing to record, got {outcome:?}"));
    }
    let record = stored_record(world)?;
    if record.assistant_used.is_some() || record.non_use_reason.is_some() {
        return Err(eyre::eyre!("pending record was changed: {record:?}"));
    }
    Ok(())
}
