//! Google Translate v2 REST client.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::common::error::OracleError;
use crate::config::TranslatorConfig;
use crate::oracle::{Detection, LanguageOracle};

/// Detections at or below this confidence are treated as no result.
const MIN_CONFIDENCE: f64 = 0.5;

/// Bound on each API call; exceeding it is a failure for that call only.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    detections: Vec<Vec<RawDetection>>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Language oracle backed by the Google Translate v2 REST API.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, OracleError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            return Err(OracleError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| OracleError::MalformedResponse {
            message: e.to_string(),
        })
    }

    async fn detect_once(&self, text: &str) -> Result<Option<Detection>, OracleError> {
        let body = serde_json::json!({ "q": text });
        let response: DetectResponse = self.post_json("/language/translate/v2/detect", &body).await?;

        let detection = response
            .data
            .detections
            .into_iter()
            .flatten()
            .next();

        Ok(detection.and_then(|d| {
            if d.language == "und" || d.confidence <= MIN_CONFIDENCE {
                None
            } else {
                Some(Detection {
                    language_code: d.language,
                    confidence: d.confidence,
                })
            }
        }))
    }

    async fn translate_once(
        &self,
        text: &str,
        to: &str,
        from: &str,
    ) -> Result<Option<String>, OracleError> {
        let body = serde_json::json!({
            "q": text,
            "target": to,
            "source": from,
            "format": "text",
        });
        let response: TranslateResponse = self.post_json("/language/translate/v2", &body).await?;

        Ok(response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .filter(|t| !t.is_empty()))
    }
}

/// Transient failures worth retrying: rate limits, server errors, transport.
fn is_transient(error: &OracleError) -> bool {
    match error {
        OracleError::Api { status, .. } => *status == 429 || *status >= 500,
        OracleError::Http(_) => true,
        OracleError::MalformedResponse { .. } => false,
    }
}

fn retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(250))
        .with_max_times(2)
}

#[async_trait]
impl LanguageOracle for GoogleTranslator {
    async fn detect(&self, text: &str) -> Result<Option<Detection>, OracleError> {
        (|| self.detect_once(text))
            .retry(retry_policy())
            .when(is_transient)
            .notify(|err, dur| warn!("Retrying language detection in {:?}: {}", dur, err))
            .await
    }

    async fn translate(
        &self,
        text: &str,
        to: &str,
        from: &str,
    ) -> Result<Option<String>, OracleError> {
        (|| self.translate_once(text, to, from))
            .retry(retry_policy())
            .when(is_transient)
            .notify(|err, dur| warn!("Retrying translation in {:?}: {}", dur, err))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_translator(base_url: &str) -> GoogleTranslator {
        GoogleTranslator::new(&TranslatorConfig {
            api_key: "test-key".to_string(),
            api_url: Some(base_url.to_string()),
        })
        .expect("client should build")
    }

    fn detect_body(language: &str, confidence: f64) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "detections": [[{
                    "language": language,
                    "confidence": confidence,
                    "isReliable": false,
                }]]
            }
        })
    }

    fn translate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "data": { "translations": [{ "translatedText": text }] }
        })
    }

    #[tokio::test]
    async fn test_detect_confident_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2/detect"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detect_body("fr", 0.9)))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        let detection = oracle.detect("Bonjour tout le monde").await.unwrap();

        let detection = detection.expect("should detect");
        assert_eq!(detection.language_code, "fr");
        assert!(detection.confidence > 0.5);
    }

    #[tokio::test]
    async fn test_detect_low_confidence_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detect_body("fr", 0.5)))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        assert!(oracle.detect("hm").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detect_undetermined_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detect_body("und", 0.99)))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        assert!(oracle.detect("123456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detect_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2/detect"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        let err = oracle.detect("text").await.unwrap_err();
        assert!(matches!(err, OracleError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translate_body("Bonjour")))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        let translated = oracle.translate("Hello", "fr", "en").await.unwrap();
        assert_eq!(translated.as_deref(), Some("Bonjour"));
    }

    #[tokio::test]
    async fn test_translate_empty_result_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [] }
            })))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        assert!(oracle.translate("Hello", "fr", "en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_translate_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translate_body("Hallo")))
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        let translated = oracle.translate("Hello", "de", "en").await.unwrap();
        assert_eq!(translated.as_deref(), Some("Hallo"));
    }

    #[tokio::test]
    async fn test_translate_no_retry_on_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let oracle = make_translator(&server.uri());
        let err = oracle.translate("Hello", "de", "en").await.unwrap_err();
        assert!(matches!(err, OracleError::Api { status: 400, .. }));
    }

    #[test]
    fn test_is_transient() {
        assert!(is_transient(&OracleError::Api {
            status: 429,
            body: String::new()
        }));
        assert!(is_transient(&OracleError::Api {
            status: 503,
            body: String::new()
        }));
        assert!(!is_transient(&OracleError::Api {
            status: 401,
            body: String::new()
        }));
        assert!(!is_transient(&OracleError::MalformedResponse {
            message: String::new()
        }));
    }
}
