//! Tests for language detection fallbacks and telemetry.

use std::sync::Arc;

use crate::survey::{
    adapters::memory::RecordingTelemetry,
    domain::LanguageCode,
    ports::{DependencyKind, LanguageDetectionError, MockLanguageDetectionClient},
    services::{LANGUAGE_DEPENDENCY, LanguageDetector},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn telemetry() -> RecordingTelemetry {
    RecordingTelemetry::new()
}

fn detector(
    client: MockLanguageDetectionClient,
    telemetry: &RecordingTelemetry,
) -> LanguageDetector<DefaultClock> {
    LanguageDetector::new(
        Arc::new(client),
        Arc::new(telemetry.clone()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("  \n\t "))]
#[tokio::test]
async fn blank_text_skips_the_remote_call(
    telemetry: RecordingTelemetry,
    #[case] text: Option<&'static str>,
) {
    let mut client = MockLanguageDetectionClient::new();
    client.expect_detect_language().times(0);

    let language = detector(client, &telemetry).detect(text).await;

    assert_eq!(language, LanguageCode::En);
    assert!(telemetry.items().is_empty());
}

#[rstest]
#[case("es", LanguageCode::Es)]
#[case("pt", LanguageCode::Pt)]
#[case("fr", LanguageCode::Fr)]
#[case("en", LanguageCode::En)]
#[case("de", LanguageCode::En)]
#[tokio::test]
async fn detected_code_is_mapped_onto_supported_languages(
    telemetry: RecordingTelemetry,
    #[case] detected: &'static str,
    #[case] expected: LanguageCode,
) {
    let mut client = MockLanguageDetectionClient::new();
    client
        .expect_detect_language()
        .withf(|text| text.contains("Descripción"))
        .times(1)
        .returning(move |_| Ok(detected.to_owned()));

    let language = detector(client, &telemetry)
        .detect(Some("Descripción del cambio"))
        .await;

    assert_eq!(language, expected);
    let dependencies = telemetry.dependencies();
    assert_eq!(dependencies.len(), 1);
    let dependency = dependencies.first().expect("one dependency");
    assert_eq!(dependency.target, LANGUAGE_DEPENDENCY);
    assert_eq!(dependency.kind, DependencyKind::Http);
    assert!(dependency.success);
}

#[rstest]
#[tokio::test]
async fn remote_failure_falls_back_and_is_reported(telemetry: RecordingTelemetry) {
    let mut client = MockLanguageDetectionClient::new();
    client
        .expect_detect_language()
        .times(1)
        .returning(|_| {
            Err(LanguageDetectionError::Status {
                status: 401,
                body: "Access denied".to_owned(),
            })
        });

    let language = detector(client, &telemetry)
        .detect(Some("Ceci est une description"))
        .await;

    assert_eq!(language, LanguageCode::En);
    let exceptions = telemetry.exceptions();
    assert_eq!(exceptions.len(), 1);
    assert!(
        exceptions
            .first()
            .is_some_and(|exception| exception.message.contains("401"))
    );
    assert!(
        telemetry
            .dependencies()
            .first()
            .is_some_and(|dependency| !dependency.success)
    );
}

#[rstest]
#[tokio::test]
async fn empty_result_falls_back(telemetry: RecordingTelemetry) {
    let mut client = MockLanguageDetectionClient::new();
    client
        .expect_detect_language()
        .times(1)
        .returning(|_| Err(LanguageDetectionError::EmptyResult));

    let language = detector(client, &telemetry).detect(Some("text")).await;

    assert_eq!(language, LanguageCode::FALLBACK);
    assert_eq!(telemetry.exceptions().len(), 1);
}
