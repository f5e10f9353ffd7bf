//! Language detection and translation.

pub mod google;
pub mod names;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::common::error::OracleError;

pub use google::GoogleTranslator;

/// A detected language with the provider's confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub language_code: String,
    pub confidence: f64,
}

/// Detect/translate capability, pure request/response.
///
/// "No usable result" (low confidence, no provider mapping) is `Ok(None)`;
/// `Err` means the call itself failed.
#[async_trait]
pub trait LanguageOracle: Send + Sync {
    async fn detect(&self, text: &str) -> Result<Option<Detection>, OracleError>;

    async fn translate(
        &self,
        text: &str,
        to: &str,
        from: &str,
    ) -> Result<Option<String>, OracleError>;
}
