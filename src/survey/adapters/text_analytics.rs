//! Language detection client for the Azure AI Language REST API.
//!
//! Submits a single document to the `analyze-text` endpoint and returns the
//! ISO 639-1 code of the detected language.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::survey::ports::{LanguageDetectionClient, LanguageDetectionError};

/// API version sent with every request.
pub const LANGUAGE_API_VERSION: &str = "2023-04-01";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const DOCUMENT_ID: &str = "1";

/// HTTP client for the language detection endpoint.
#[derive(Clone)]
pub struct TextAnalyticsClient {
    client: reqwest::Client,
    endpoint: String,
    key: String,
}

impl TextAnalyticsClient {
    /// Creates a client reusing an existing [`reqwest::Client`].
    ///
    /// * `endpoint` - Resource URL, e.g. `https://example.cognitiveservices.azure.com`.
    /// * `key` - Subscription key for the resource.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            key: key.into(),
        }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/language/:analyze-text?api-version={LANGUAGE_API_VERSION}",
            self.endpoint
        )
    }
}

impl std::fmt::Debug for TextAnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAnalyticsClient")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LanguageDetectionClient for TextAnalyticsClient {
    async fn detect_language(&self, text: &str) -> Result<String, LanguageDetectionError> {
        let response = self
            .client
            .post(self.analyze_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .json(&AnalyzeTextRequest::language_detection(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            return Err(LanguageDetectionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<AnalyzeTextResponse>()
            .await?
            .into_detected_language()
    }
}

/// Request body of the `analyze-text` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextRequest<'a> {
    kind: &'static str,
    analysis_input: AnalysisInput<'a>,
}

#[derive(Debug, Serialize)]
struct AnalysisInput<'a> {
    documents: [InputDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InputDocument<'a> {
    id: &'static str,
    text: &'a str,
}

impl<'a> AnalyzeTextRequest<'a> {
    const fn language_detection(text: &'a str) -> Self {
        Self {
            kind: "LanguageDetection",
            analysis_input: AnalysisInput {
                documents: [InputDocument {
                    id: DOCUMENT_ID,
                    text,
                }],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextResponse {
    results: AnalyzeTextResults,
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextResults {
    #[serde(default)]
    documents: Vec<DetectedDocument>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedDocument {
    detected_language: DetectedLanguage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedLanguage {
    iso6391_name: String,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl AnalyzeTextResponse {
    fn into_detected_language(self) -> Result<String, LanguageDetectionError> {
        let AnalyzeTextResults { documents, errors } = self.results;
        if let Some(DocumentError { error }) = errors.into_iter().next() {
            return Err(LanguageDetectionError::Document(format!(
                "{}: {}",
                error.code, error.message
            )));
        }
        documents
            .into_iter()
            .next()
            .map(|document| document.detected_language.iso6391_name)
            .filter(|code| !code.trim().is_empty())
            .ok_or(LanguageDetectionError::EmptyResult)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyzeTextRequest, AnalyzeTextResponse, TextAnalyticsClient};
    use crate::survey::ports::LanguageDetectionError;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn request_body_wraps_text_in_a_single_document() {
        let body = serde_json::to_value(AnalyzeTextRequest::language_detection("Hola mundo"))
            .expect("request serializes");

        assert_eq!(
            body,
            json!({
                "kind": "LanguageDetection",
                "analysisInput": {
                    "documents": [{ "id": "1", "text": "Hola mundo" }]
                }
            })
        );
    }

    #[rstest]
    fn debug_output_redacts_subscription_key() {
        let client = TextAnalyticsClient::with_client(
            reqwest::Client::new(),
            "https://lang.example.com",
            "0123-subscription-key",
        );

        let rendered = format!("{client:?}");

        assert!(!rendered.contains("0123-subscription-key"));
        assert!(rendered.contains("https://lang.example.com"));
    }

    #[rstest]
    #[case("https://lang.example.com")]
    #[case("https://lang.example.com/")]
    fn analyze_url_targets_versioned_endpoint(#[case] endpoint: &str) {
        let client = TextAnalyticsClient::with_client(reqwest::Client::new(), endpoint, "key");

        assert_eq!(
            client.analyze_url(),
            "https://lang.example.com/language/:analyze-text?api-version=2023-04-01"
        );
    }

    #[rstest]
    fn response_yields_iso_code_of_first_document() {
        let response: AnalyzeTextResponse = serde_json::from_value(json!({
            "kind": "LanguageDetectionResults",
            "results": {
                "documents": [{
                    "id": "1",
                    "detectedLanguage": {
                        "name": "Portuguese",
                        "iso6391Name": "pt",
                        "confidenceScore": 0.98
                    },
                    "warnings": []
                }],
                "errors": [],
                "modelVersion": "2022-10-01"
            }
        }))
        .expect("response deserializes");

        assert_eq!(response.into_detected_language().expect("language"), "pt");
    }

    #[rstest]
    fn document_errors_are_reported() {
        let response: AnalyzeTextResponse = serde_json::from_value(json!({
            "results": {
                "documents": [],
                "errors": [{
                    "id": "1",
                    "error": { "code": "InvalidArgument", "message": "Document text is empty." }
                }]
            }
        }))
        .expect("response deserializes");

        let err = response
            .into_detected_language()
            .expect_err("document error should fail");
        assert!(matches!(
            err,
            LanguageDetectionError::Document(ref message)
                if message == "InvalidArgument: Document text is empty."
        ));
    }

    #[rstest]
    fn missing_documents_are_an_empty_result() {
        let response: AnalyzeTextResponse =
            serde_json::from_value(json!({ "results": {} })).expect("response deserializes");

        assert!(matches!(
            response.into_detected_language(),
            Err(LanguageDetectionError::EmptyResult)
        ));
    }
}
