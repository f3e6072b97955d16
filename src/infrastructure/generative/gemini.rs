//! Google Gemini design provider

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::GenerativeConfig;
use crate::domain::design::{CardDesign, DesignBrief, DesignProvider, GenerativeError};
use crate::infrastructure::generative::json_extract::parse_model_json;

/// Card design provider backed by the Gemini `generateContent` API
pub struct GeminiDesignProvider {
    client: Client,
    config: GenerativeConfig,
}

impl GeminiDesignProvider {
    pub fn new(config: GenerativeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    fn api_key(&self) -> Result<&str, GenerativeError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerativeError::Configuration("Gemini API key not configured".into()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn build_prompt(display_name: Option<&str>) -> String {
    let mut prompt = String::from(
        "You design payment card visuals. Using the attached logo as the brand \
         anchor, produce one card design and answer with ONLY a JSON object of \
         this exact shape: {\"name\": string, \"background\": {\"kind\": \
         \"solid\"|\"linear_gradient\"|\"radial_gradient\", \"colors\": \
         [\"#RRGGBB\", ...], \"angle_degrees\": number|null}, \"text_color\": \
         \"#RRGGBB\", \"accent_color\": \"#RRGGBB\", \"logo_placement\": \
         {\"x\": 0..1, \"y\": 0..1, \"scale\": 0..1}, \"style_notes\": \
         string|null}. Pick colors that complement the logo.",
    );
    if let Some(name) = display_name {
        prompt.push_str(&format!(" The cardholder line reads \"{}\".", name));
    }
    prompt
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl DesignProvider for GeminiDesignProvider {
    async fn generate_design(&self, brief: &DesignBrief) -> Result<CardDesign, GenerativeError> {
        let api_key = self.api_key()?;
        let url = self.endpoint();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(build_prompt(brief.display_name.as_deref())),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: brief.logo_mime.clone(),
                            data: BASE64.encode(&brief.logo),
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!("Sending design generation request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Generative API error: {} - {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GenerativeError::Authentication(format!("provider returned {}", status))
                }
                StatusCode::TOO_MANY_REQUESTS => GenerativeError::RateLimited {
                    retry_after: None,
                    message: format!("provider returned {}", status),
                },
                s if s.is_server_error() => {
                    GenerativeError::ServiceUnavailable(format!("provider returned {}", s))
                }
                s => GenerativeError::ContractViolation(format!(
                    "unexpected provider status {}",
                    s
                )),
            });
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerativeError::ContractViolation(format!("unparseable provider response: {}", e))
        })?;

        let text: String = payload
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerativeError::ContractViolation(
                "provider response carried no text candidate".to_string(),
            ));
        }

        let design: CardDesign = parse_model_json(&text)?;
        design
            .validate()
            .map_err(GenerativeError::ContractViolation)?;

        Ok(design)
    }
}
