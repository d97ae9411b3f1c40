//! Completion binding over the chat-completions API.

use crate::{endpoint, headers};
use anyhow::Result;
use hcore::Completion;
use reqwest::{Client, Method, header::HeaderMap};
use serde::{Deserialize, Serialize};

/// A chat-completions client for a single model.
#[derive(Clone)]
pub struct Chat {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    model: String,
}

impl Chat {
    /// Create a client targeting the OpenAI API.
    pub fn api(client: Client, key: &str, model: impl Into<String>) -> Result<Self> {
        Self::custom(client, Some(key), endpoint::OPENAI_CHAT, model)
    }

    /// Create a client targeting a local Ollama instance (no API key).
    pub fn ollama(client: Client, model: impl Into<String>) -> Result<Self> {
        Self::custom(client, None, endpoint::OLLAMA_CHAT, model)
    }

    /// Create a client targeting a custom OpenAI-compatible endpoint.
    pub fn custom(
        client: Client,
        key: Option<&str>,
        endpoint: &str,
        model: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            headers: headers(key)?,
            endpoint: endpoint.to_owned(),
            model: model.into(),
        })
    }
}

impl Completion for Chat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = Request {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };
        tracing::debug!("request: {}", serde_json::to_string(&body)?);

        let text = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .text()
            .await?;
        tracing::debug!("response: {text}");

        let response: Response = serde_json::from_str(&text)?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("completion response has no choices"))
    }
}

/// The request body for the chat-completions API.
#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_user_message() {
        let body = Request {
            model: "gpt-4o-mini",
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""model":"gpt-4o-mini""#));
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains(r#""content":"hello""#));
    }

    #[test]
    fn response_parses_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Success"}}
            ]
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Success");
    }
}
