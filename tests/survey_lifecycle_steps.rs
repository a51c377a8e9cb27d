//! Behaviour tests for the survey lifecycle.

#[path = "survey_lifecycle_steps/mod.rs"]
mod survey_lifecycle_steps_defs;

use rstest_bdd_macros::scenario;
use survey_lifecycle_steps_defs::world::{SurveyWorld, world};

#[scenario(
    path = "tests/features/survey_lifecycle.feature",
    name = "Closing a pull request opens a localized survey"
)]
#[tokio::test(flavor = "multi_thread")]
async fn closing_pull_request_opens_localized_survey(world: SurveyWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/survey_lifecycle.feature",
    name = "Ticking yes and a usage bucket closes the survey"
)]
#[tokio::test(flavor = "multi_thread")]
async fn affirmative_answer_with_bucket_closes_survey(world: SurveyWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/survey_lifecycle.feature",
    name = "A negative answer waits for a reason"
)]
#[tokio::test(flavor = "multi_thread")]
async fn negative_answer_waits_for_reason(world: SurveyWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/survey_lifecycle.feature",
    name = "Unticked surveys record nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unticked_survey_records_nothing(world: SurveyWorld) {
    let _ = world;
}
