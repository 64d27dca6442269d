use crate::error::InterviewError;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat,
        ResponseFormatJsonSchema,
    },
};
use async_trait::async_trait;
use schemars::{JsonSchema, SchemaGenerator};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// OpenAI's API root. async-openai appends `/chat/completions`, so no
/// trailing slash.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// Gemini's OpenAI-compatible API root.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// A single schema-constrained completion request.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub system_prompt: String,
    pub user_content: String,
    /// Name reported to the provider for the response format.
    pub schema_name: String,
    pub schema: Value,
}

/// A generic client for interacting with an LLM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Makes a single, non-streaming call whose output must conform to
    /// `request.schema`. Returns the raw JSON text of the response.
    async fn complete_structured(&self, request: StructuredRequest)
    -> Result<String, InterviewError>;
}

/// Calls `client` with the strict schema of `T` and decodes the result.
pub async fn generate<T>(
    client: &dyn LLMClient,
    system_prompt: String,
    user_content: String,
    schema_name: &str,
) -> Result<T, InterviewError>
where
    T: JsonSchema + DeserializeOwned,
{
    let request = StructuredRequest {
        system_prompt,
        user_content,
        schema_name: schema_name.to_string(),
        schema: strict_schema::<T>(),
    };
    let raw = client.complete_structured(request).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Builds the JSON schema of `T` in the shape strict structured output
/// accepts: closed objects, every property required, no `format` keywords.
pub fn strict_schema<T: JsonSchema>() -> Value {
    let mut value = SchemaGenerator::default()
        .into_root_schema_for::<T>()
        .to_value();
    normalise_schema(&mut value);
    value
}

fn normalise_schema(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };
    if map.contains_key("$ref") {
        map.retain(|key, _| key == "$ref");
        return;
    }
    map.remove("$schema");
    map.remove("format");

    // Keys of these maps are property or definition names, not keywords.
    for key in ["properties", "$defs", "definitions"] {
        if let Some(Value::Object(children)) = map.get_mut(key) {
            children.values_mut().for_each(normalise_schema);
        }
    }
    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(variants)) = map.get_mut(key) {
            variants.iter_mut().for_each(normalise_schema);
        }
    }
    if let Some(items) = map.get_mut("items") {
        normalise_schema(items);
    }

    let required: Option<Vec<Value>> = match map.get("properties") {
        Some(Value::Object(props)) => Some(props.keys().cloned().map(Value::String).collect()),
        _ => None,
    };
    if let Some(required) = required {
        map.insert("required".to_string(), Value::Array(required));
        map.insert("additionalProperties".to_string(), Value::Bool(false));
    }
}

/// Best-effort HTTP status for an API error body, which carries a type and
/// code but not the status line itself.
fn status_for_api_error(kind: Option<&str>, code: Option<&str>) -> Option<u16> {
    match code {
        Some("invalid_api_key") => return Some(401),
        Some("rate_limit_exceeded") | Some("insufficient_quota") => return Some(429),
        Some("model_not_found") => return Some(404),
        _ => {}
    }
    match kind {
        Some("invalid_request_error") => Some(400),
        Some("authentication_error") => Some(401),
        Some("permission_error") => Some(403),
        Some("rate_limit_error") | Some("tokens") | Some("requests") => Some(429),
        Some("server_error") => Some(500),
        _ => None,
    }
}

impl From<OpenAIError> for InterviewError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => InterviewError::Upstream {
                status: status_for_api_error(api.r#type.as_deref(), api.code.as_deref()),
                message: api.message,
            },
            OpenAIError::Reqwest(e) => InterviewError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            OpenAIError::JSONDeserialize(e) => InterviewError::Decode(e),
            OpenAIError::InvalidArgument(message) => InterviewError::Internal(message),
            other => InterviewError::Upstream {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

/// An implementation of `LLMClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o-mini").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<String, InterviewError> {
        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: request.schema_name,
                schema: Some(request.schema),
                strict: Some(true),
            },
        };

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.system_prompt)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.user_content)
                    .build()?
                    .into(),
            ])
            .response_format(response_format)
            .build()?;

        let response: CreateChatCompletionResponse =
            self.client.chat().create(chat_request).await?;
        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Structured completion finished"
            );
        }

        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or(InterviewError::EmptyResponse)?
            .message;

        if let Some(refusal) = message.refusal {
            return Err(InterviewError::Refusal(refusal));
        }
        message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(InterviewError::EmptyResponse)
    }
}
