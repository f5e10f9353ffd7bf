//! Scripted oracle for unit tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::common::error::OracleError;
use crate::oracle::{Detection, LanguageOracle};

/// Oracle whose detections are scripted per input text and whose
/// translations are deterministic (`"[to] text"`), with selectable
/// per-input failures.
#[derive(Default)]
pub struct FakeOracle {
    detections: HashMap<String, Detection>,
    /// Inputs for which `translate` returns `Ok(None)`.
    untranslatable: HashSet<String>,
    /// (input, target language) pairs for which `translate` returns `Ok(None)`.
    untranslatable_to: HashSet<(String, String)>,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a detection result for an exact input text.
    pub fn detects(mut self, text: &str, language_code: &str, confidence: f64) -> Self {
        self.detections.insert(
            text.to_string(),
            Detection {
                language_code: language_code.to_string(),
                confidence,
            },
        );
        self
    }

    /// Make `translate` yield no result for this input text.
    pub fn fails_to_translate(mut self, text: &str) -> Self {
        self.untranslatable.insert(text.to_string());
        self
    }

    /// Make `translate` yield no result for this input text into one
    /// specific target language.
    pub fn fails_to_translate_to(mut self, text: &str, to: &str) -> Self {
        self.untranslatable_to
            .insert((text.to_string(), to.to_string()));
        self
    }

    /// The deterministic translation this fake produces.
    pub fn translated(text: &str, to: &str) -> String {
        format!("[{to}] {text}")
    }
}

#[async_trait]
impl LanguageOracle for FakeOracle {
    async fn detect(&self, text: &str) -> Result<Option<Detection>, OracleError> {
        Ok(self
            .detections
            .get(text)
            .filter(|d| d.confidence > 0.5)
            .cloned())
    }

    async fn translate(
        &self,
        text: &str,
        to: &str,
        _from: &str,
    ) -> Result<Option<String>, OracleError> {
        if self.untranslatable.contains(text)
            || self
                .untranslatable_to
                .contains(&(text.to_string(), to.to_string()))
        {
            return Ok(None);
        }
        Ok(Some(Self::translated(text, to)))
    }
}
