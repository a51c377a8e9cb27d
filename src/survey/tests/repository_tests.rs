//! Contract tests for the in-memory survey repository.

use crate::survey::{
    adapters::memory::InMemorySurveyRepository,
    domain::{
        IssueId, IssueNumber, PullRequestNumber, RepositoryRef, SurveyAnswer,
        SurveyIssueContext, SurveyResponse, SurveyUpsert, UpsertOutcome,
    },
    ports::SurveyRepository,
};
use chrono::{TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemorySurveyRepository {
    InMemorySurveyRepository::new()
}

#[fixture]
fn context() -> SurveyIssueContext {
    let opened = Utc
        .with_ymd_and_hms(2026, 10, 2, 14, 30, 0)
        .single()
        .expect("valid timestamp");
    SurveyIssueContext {
        enterprise_name: None,
        repository: RepositoryRef::new("octo-org", "widgets").expect("valid repository"),
        issue_id: IssueId::new(501).expect("valid issue id"),
        issue_number: IssueNumber::new(12).expect("valid issue number"),
        assignee_login: Some("mona".to_owned()),
        created_at: opened,
        updated_at: opened,
    }
}

fn pr(number: u64) -> PullRequestNumber {
    PullRequestNumber::new(number).expect("valid pull request number")
}

#[rstest]
#[tokio::test]
async fn second_upsert_updates_the_single_record(
    repository: InMemorySurveyRepository,
    context: SurveyIssueContext,
) {
    let first = SurveyUpsert::new(context.clone(), SurveyAnswer::pending(pr(42)));
    let response =
        SurveyResponse::parse("PR #42\n- [x] Yes\n- [x] 75%-100%", None).expect("valid body");
    let mut later_context = context.clone();
    later_context.updated_at = context.updated_at + TimeDelta::minutes(5);
    let second = SurveyUpsert::new(
        later_context,
        SurveyAnswer::from_response(pr(42), &response),
    );

    let first_outcome = repository.upsert(&first).await.expect("first upsert");
    let second_outcome = repository.upsert(&second).await.expect("second upsert");

    assert_eq!(first_outcome, UpsertOutcome::Inserted);
    assert_eq!(second_outcome, UpsertOutcome::Updated);
    assert_eq!(repository.len().expect("count"), 1);

    let record = repository
        .find_by_issue_id(context.issue_id)
        .await
        .expect("lookup")
        .expect("record exists");
    assert_eq!(record.assistant_used, Some(true));
    assert_eq!(
        record.usage_percentage.map(|usage| usage.to_storage()),
        Some("75%-100%".to_owned())
    );
    assert_eq!(record.created_at, context.created_at);
    assert_eq!(record.updated_at, context.updated_at + TimeDelta::minutes(5));
}

#[rstest]
#[tokio::test]
async fn edit_without_comment_clears_previous_reason(
    repository: InMemorySurveyRepository,
    context: SurveyIssueContext,
) {
    let commented = SurveyResponse::parse("PR #42\n- [x] No", Some("No licence yet"))
        .expect("valid body");
    let edited = SurveyResponse::parse("PR #42\n- [x] No", None).expect("valid body");

    repository
        .upsert(&SurveyUpsert::new(
            context.clone(),
            SurveyAnswer::from_response(pr(42), &commented),
        ))
        .await
        .expect("first upsert");
    repository
        .upsert(&SurveyUpsert::new(
            context.clone(),
            SurveyAnswer::from_response(pr(42), &edited),
        ))
        .await
        .expect("second upsert");

    let record = repository
        .find_by_issue_id(context.issue_id)
        .await
        .expect("lookup")
        .expect("record exists");
    assert_eq!(record.non_use_reason, None);
    assert_eq!(record.assistant_used, Some(false));
}

#[rstest]
#[tokio::test]
async fn unknown_issue_has_no_record(repository: InMemorySurveyRepository) {
    let missing = IssueId::new(77).expect("valid issue id");

    let found = repository.find_by_issue_id(missing).await.expect("lookup");

    assert!(found.is_none());
    assert!(repository.is_empty().expect("count"));
}
