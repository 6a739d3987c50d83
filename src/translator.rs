use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::TRANSLATE_API_BASE;

/// Thin client for the Google Translate v2 REST API.
#[derive(Clone)]
pub struct Translator {
    http: reqwest::Client,
    api_key: String,
}

/// One translation result.
#[derive(Debug, Clone)]
pub struct Translation {
    pub translated_text: String,
    pub detected_source_language: Option<String>,
}

/// One supported language, with its display name when the API provides one.
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub language: String,
    #[serde(default)]
    pub name: Option<String>,
}

// The v2 API wraps every payload in a "data" envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TranslationsPayload {
    translations: Vec<RawTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTranslation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguagesPayload {
    languages: Vec<Language>,
}

impl Translator {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Translate text into the target language (ISO 639-1 code). The source
    /// language is detected by the service.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<Translation> {
        let response = self
            .http
            .post(TRANSLATE_API_BASE)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("q", text), ("target", target_language), ("format", "text")])
            .send()
            .await
            .context("Failed to reach the translation service")?
            .error_for_status()
            .context("The translation service rejected the request")?;

        let envelope: Envelope<TranslationsPayload> = response
            .json()
            .await
            .context("Failed to parse the translation response")?;

        let first = envelope
            .data
            .translations
            .into_iter()
            .next()
            .context("The translation service returned no translations")?;

        Ok(Translation {
            translated_text: first.translated_text,
            detected_source_language: first.detected_source_language,
        })
    }

    /// All languages the service can translate into, named in
    /// `display_language`.
    pub async fn languages(&self, display_language: &str) -> Result<Vec<Language>> {
        let url = format!("{TRANSLATE_API_BASE}/languages");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("target", display_language),
            ])
            .send()
            .await
            .context("Failed to reach the translation service")?
            .error_for_status()
            .context("The translation service rejected the language listing")?;

        let envelope: Envelope<LanguagesPayload> = response
            .json()
            .await
            .context("Failed to parse the language listing")?;

        Ok(envelope.data.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_translation_envelope() {
        let payload = r#"{
            "data": {
                "translations": [
                    {"translatedText": "Bonjour le monde", "detectedSourceLanguage": "en"}
                ]
            }
        }"#;

        let envelope: Envelope<TranslationsPayload> = serde_json::from_str(payload).unwrap();
        let first = &envelope.data.translations[0];
        assert_eq!(first.translated_text, "Bonjour le monde");
        assert_eq!(first.detected_source_language.as_deref(), Some("en"));
    }

    #[test]
    fn parses_language_listing_envelope() {
        let payload = r#"{
            "data": {
                "languages": [
                    {"language": "fr", "name": "French"},
                    {"language": "eo"}
                ]
            }
        }"#;

        let envelope: Envelope<LanguagesPayload> = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.data.languages.len(), 2);
        assert_eq!(envelope.data.languages[0].name.as_deref(), Some("French"));
        assert_eq!(envelope.data.languages[1].name, None);
    }
}
