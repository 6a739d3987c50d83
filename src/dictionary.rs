use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::constants::WORDNIK_API_BASE;

/// Thin client for the Wordnik v4 word API.
#[derive(Clone)]
pub struct Wordnik {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub source_dictionary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExamplesResponse {
    #[serde(default)]
    examples: Vec<Example>,
}

// relatedWords returns one group per relationship type
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedWordsGroup {
    relationship_type: String,
    #[serde(default)]
    words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOfTheDay {
    pub word: String,
    #[serde(default)]
    pub definitions: Vec<WotdDefinition>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WotdDefinition {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
}

impl Wordnik {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{WORDNIK_API_BASE}{path}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to reach Wordnik at {path}"))?
            .error_for_status()
            .with_context(|| format!("Wordnik rejected the request to {path}"))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse the Wordnik response from {path}"))
    }

    /// Definitions of a word across Wordnik's source dictionaries.
    pub async fn definitions(&self, word: &str, limit: usize) -> Result<Vec<Definition>> {
        self.get_json(
            &format!("/word.json/{word}/definitions"),
            &[
                ("limit", limit.to_string()),
                ("includeRelated", "false".to_owned()),
                ("useCanonical", "false".to_owned()),
                ("includeTags", "false".to_owned()),
            ],
        )
        .await
    }

    async fn related(&self, word: &str, relationship: &str, limit: usize) -> Result<Vec<String>> {
        let groups: Vec<RelatedWordsGroup> = self
            .get_json(
                &format!("/word.json/{word}/relatedWords"),
                &[
                    ("relationshipTypes", relationship.to_owned()),
                    ("limitPerRelationshipType", limit.to_string()),
                    ("useCanonical", "false".to_owned()),
                ],
            )
            .await?;

        Ok(groups
            .into_iter()
            .filter(|group| group.relationship_type == relationship)
            .flat_map(|group| group.words)
            .collect())
    }

    pub async fn synonyms(&self, word: &str, limit: usize) -> Result<Vec<String>> {
        self.related(word, "synonym", limit).await
    }

    pub async fn antonyms(&self, word: &str, limit: usize) -> Result<Vec<String>> {
        self.related(word, "antonym", limit).await
    }

    /// Usage examples pulled from Wordnik's corpus.
    pub async fn examples(&self, word: &str, limit: usize) -> Result<Vec<Example>> {
        let response: ExamplesResponse = self
            .get_json(
                &format!("/word.json/{word}/examples"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(response.examples)
    }

    pub async fn word_of_the_day(&self) -> Result<WordOfTheDay> {
        self.get_json("/words.json/wordOfTheDay", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_definition_payload() {
        let payload = r#"[
            {"text": "A domestic animal.", "partOfSpeech": "noun", "sourceDictionary": "wiktionary"},
            {"partOfSpeech": "noun"}
        ]"#;

        let definitions: Vec<Definition> = serde_json::from_str(payload).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].text.as_deref(), Some("A domestic animal."));
        assert_eq!(definitions[1].text, None);
    }

    #[test]
    fn parses_related_words_payload() {
        let payload = r#"[
            {"relationshipType": "synonym", "words": ["feline", "mouser"]},
            {"relationshipType": "rhyme", "words": ["hat"]}
        ]"#;

        let groups: Vec<RelatedWordsGroup> = serde_json::from_str(payload).unwrap();
        let synonyms: Vec<String> = groups
            .into_iter()
            .filter(|g| g.relationship_type == "synonym")
            .flat_map(|g| g.words)
            .collect();
        assert_eq!(synonyms, ["feline", "mouser"]);
    }

    #[test]
    fn parses_word_of_the_day_payload() {
        let payload = r#"{
            "word": "sesquipedalian",
            "definitions": [{"text": "Given to using long words.", "partOfSpeech": "adjective"}],
            "note": "From Horace."
        }"#;

        let wotd: WordOfTheDay = serde_json::from_str(payload).unwrap();
        assert_eq!(wotd.word, "sesquipedalian");
        assert_eq!(wotd.definitions.len(), 1);
    }
}
