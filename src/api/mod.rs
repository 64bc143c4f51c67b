//! Wire types and the single request against the `generateContent`
//! endpoint. Each call is stateless: only the current user text goes out,
//! never the conversation history.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Reply text of the first candidate, when the response carries one.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Sends one prompt and returns the extracted reply text. A response
/// without a text part comes back as an empty string; the caller decides
/// what notice to substitute.
pub async fn generate(
    client: &reqwest::Client,
    base_url: &str,
    model: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let url = construct_generate_url(base_url, model);
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", api_key)
        .json(&GenerateRequest::from_prompt(prompt))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("API request failed with status {status}: {error_text}").into());
    }

    let decoded = response.json::<GenerateResponse>().await?;
    Ok(decoded.text().unwrap_or_default().to_string())
}

fn construct_generate_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_the_wire_shape() {
        let encoded = serde_json::to_string(&GenerateRequest::from_prompt("hi there")).unwrap();
        assert_eq!(encoded, r#"{"contents":[{"parts":[{"text":"hi there"}]}]}"#);
    }

    #[test]
    fn reply_text_is_extracted_from_the_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}], "role": "model"}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }"#;
        let decoded: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.text(), Some("first"));
    }

    #[test]
    fn responses_without_text_read_as_none() {
        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);

        let no_content: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":null}]}"#).unwrap();
        assert_eq!(no_content.text(), None);

        let no_text_part: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#).unwrap();
        assert_eq!(no_text_part.text(), None);
    }

    #[test]
    fn url_construction_tolerates_trailing_slashes() {
        assert_eq!(
            construct_generate_url("https://example.test/v1beta/", "gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
