use super::{truncate, AssistantClient, GENERATION_ERROR, NO_RESPONSE};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for `models/<model>:generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body. Every level is optional so a missing key is a `None`, not a
/// decode error.
#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(GeminiClient {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn generate_path(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn generate_url(&self) -> Result<Url> {
        let base = self.generate_path();
        Url::parse_with_params(&base, &[("key", self.api_key.as_str())])
            .with_context(|| format!("invalid Gemini endpoint URL {base:?}"))
    }

    /// One request. `Ok(None)` means the endpoint answered without usable text.
    fn call(&self, prompt: &str, system_instruction: &str) -> Result<Option<String>> {
        let url = self.generate_url()?;

        log::info!("Calling Gemini model {:?}", &self.model);
        log::debug!("POST {}?key=<redacted>", self.generate_path());

        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
        };

        let body = serde_json::to_string(&req).context("failed to encode Gemini request")?;
        log::trace!("Gemini request body: {}", truncate(&body, 4000));

        let resp = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| e.without_url())
            .context("failed to send request to Gemini")?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("Gemini API returned HTTP {}", status.as_u16());
        }

        let text = resp
            .text()
            .map_err(|e| e.without_url())
            .context("failed to read Gemini response body")?;

        log::trace!("Gemini raw JSON response: {}", truncate(&text, 4000));

        let value: serde_json::Value =
            serde_json::from_str(&text).context("Gemini response is not valid JSON")?;

        // Valid JSON of the wrong shape counts as "no candidate text".
        let parsed = serde_json::from_value::<GenerateResponse>(value).ok();
        Ok(parsed.and_then(GenerateResponse::first_text))
    }
}

impl AssistantClient for GeminiClient {
    fn generate(&self, prompt: &str, system_instruction: &str) -> String {
        log::debug!("Generation prompt:\n{}", truncate(prompt, 2000));

        match self.call(prompt, system_instruction) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::warn!("Gemini response carried no candidate text");
                NO_RESPONSE.to_string()
            }
            Err(err) => {
                log::warn!("Gemini call failed: {err:#}");
                GENERATION_ERROR.to_string()
            }
        }
    }
}
