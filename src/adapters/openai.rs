use crate::adapters::prompt::{system_prompt, user_prompt};
use crate::config::LlmConfig;
use crate::domain::model::{AnnotatedEvidence, Claim, Verdict, VerdictLabel};
use crate::domain::ports::VerdictRequester;
use crate::utils::error::{CheckError, Result};
use crate::utils::text::truncate_chars;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// 模型輸出的判定格式
#[derive(Debug, Deserialize)]
struct VerdictPayload {
    label: String,
    explanation: String,
}

/// OpenAI 相容的 chat-completions 客戶端
pub struct OpenAiVerdictRequester {
    config: LlmConfig,
    client: Client,
}

impl OpenAiVerdictRequester {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CheckError::ConfigValidationError {
                field: "llm".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }
}

/// 解析模型回傳的內容；不符合 {label, explanation} 格式一律視為 `VerdictUnavailable`
pub(crate) fn parse_verdict_content(content: &str) -> Result<(VerdictLabel, String)> {
    let payload: VerdictPayload = serde_json::from_str(content.trim()).map_err(|e| {
        CheckError::verdict_unavailable(format!(
            "model response is not a structured verdict: {} (content: {})",
            e,
            truncate_chars(content, 200)
        ))
    })?;

    let label = VerdictLabel::parse(&payload.label).ok_or_else(|| {
        CheckError::verdict_unavailable(format!("unknown verdict label '{}'", payload.label))
    })?;

    let explanation = payload.explanation.trim().to_string();
    if explanation.is_empty() {
        return Err(CheckError::verdict_unavailable("verdict explanation is empty"));
    }

    Ok((label, explanation))
}

#[async_trait]
impl VerdictRequester for OpenAiVerdictRequester {
    async fn request(&self, claim: &Claim, evidence: &[AnnotatedEvidence]) -> Result<Verdict> {
        let api_key = self.config.api_key();
        if api_key.trim().is_empty() {
            return Err(CheckError::verdict_unavailable("language model API key is not configured"));
        }

        let request = ChatRequest {
            model: self.config.model(),
            temperature: self.config.temperature(),
            response_format: ResponseFormat {
                r#type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system_prompt()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(user_prompt(claim, evidence)),
                },
            ],
        };

        tracing::debug!(
            "Requesting verdict from {} (model: {}, {} sources)",
            self.config.endpoint(),
            self.config.model(),
            evidence.len()
        );
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CheckError::verdict_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Language model response status: {}", status);
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CheckError::verdict_unavailable(
                "rate limited by the language model API (HTTP 429)",
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckError::verdict_unavailable(format!(
                "HTTP {}: {}",
                status,
                truncate_chars(&body, 300)
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CheckError::verdict_unavailable(format!("malformed response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CheckError::verdict_unavailable("response contained no message content"))?;

        let (label, explanation) = parse_verdict_content(&content)?;
        Ok(Verdict::new(label, explanation, evidence.to_vec()))
    }
}
