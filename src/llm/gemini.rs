use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::camera::FaceImages;
use crate::config::Config;
use crate::guide::{ContentBlock, Difficulty, LearningMethod};

use super::prompt::{guide_prompt, solve_prompt};
use super::schema::{
    parse_blocks, GenerateContentRequest, GenerateContentResponse, Part, GUIDE_KEY, SOLUTION_KEY,
};
use super::{
    GenerationError, GuideService, ReplyError, SolveError, SolveService, TransportError,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Sends one `generateContent` call and returns the reply text.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<Option<String>, TransportError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else if e.is_connect() {
                    TransportError::Connect
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 => TransportError::Unauthorized,
                403 => TransportError::Forbidden,
                429 => TransportError::RateLimited,
                code @ 500..=599 => TransportError::Server { status: code, body },
                code => TransportError::Http { status: code, body },
            });
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(reply.text())
    }
}

#[async_trait]
impl GuideService for GeminiClient {
    async fn request_guide(
        &self,
        method: LearningMethod,
        difficulty: Difficulty,
    ) -> Result<Vec<ContentBlock>, GenerationError> {
        info!(method = method.short_name(), difficulty = difficulty.label(), model = %self.model, "requesting guide");
        let request = GenerateContentRequest::blocks(
            vec![Part::text(guide_prompt(method, difficulty))],
            GUIDE_KEY,
        );

        let result = match self.generate(&request).await? {
            Some(text) => parse_blocks(&text, GUIDE_KEY),
            None => Err(ReplyError::Empty),
        };
        match result {
            Ok(blocks) => {
                debug!(count = blocks.len(), "guide received");
                Ok(blocks)
            }
            Err(err) => {
                warn!(error = %err, "guide reply rejected");
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl SolveService for GeminiClient {
    async fn request_solution(
        &self,
        faces: &FaceImages,
        method: LearningMethod,
    ) -> Result<Vec<ContentBlock>, SolveError> {
        info!(method = method.short_name(), model = %self.model, "requesting solution");
        let mut parts: Vec<Part> = faces
            .iter()
            .map(|(_, image)| Part::inline(image.mime_type.clone(), image.data.clone()))
            .collect();
        parts.push(Part::text(solve_prompt(method)));
        let request = GenerateContentRequest::blocks(parts, SOLUTION_KEY);

        let result = match self.generate(&request).await? {
            Some(text) => parse_blocks(&text, SOLUTION_KEY),
            None => Err(ReplyError::Empty),
        };
        match result {
            Ok(blocks) => {
                debug!(count = blocks.len(), "solution received");
                Ok(blocks)
            }
            Err(err) => {
                warn!(error = %err, "solution reply rejected");
                Err(err.into())
            }
        }
    }
}
