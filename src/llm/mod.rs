//! # Generation services
//!
//! The cube knowledge lives in a hosted model. This module defines the two
//! collaborator contracts the app depends on and a Gemini-backed client that
//! implements both:
//!
//! ```text
//! method + difficulty ──► GuideService::request_guide ──► Vec<ContentBlock>
//! six face images     ──► SolveService::request_solution ──► Vec<ContentBlock>
//! ```
//!
//! Every reply is a JSON envelope (`{"guide": [...]}` or `{"solution": [...]}`)
//! of `{type, content}` blocks, checked only for shape and non-emptiness.
//! Failures are reported once; retrying is left to the user.

pub mod gemini;
pub mod prompt;
pub mod schema;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::camera::FaceImages;
use crate::guide::{ContentBlock, Difficulty, LearningMethod};

pub const GUIDE_ERROR_MESSAGE: &str = "Failed to generate the learning guide. Please try again.";
pub const SOLVE_ERROR_MESSAGE: &str =
    "Failed to get solution from AI. Please try again with clearer pictures.";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
    #[error("Request timeout - the API took too long to respond")]
    Timeout,
    #[error("Connection error - unable to reach the API")]
    Connect,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed - check your API key")]
    Unauthorized,
    #[error("Access forbidden - insufficient permissions")]
    Forbidden,
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse API response as JSON: {0}")]
    Decode(String),
}

/// Problems with the content of a reply that arrived fine.
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("Model returned no content")]
    Empty,
    #[error("Model reply is malformed: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to communicate with the AI model to create the learning guide: {0}")]
    Transport(#[from] TransportError),
    #[error("AI returned no guide content.")]
    Empty,
    #[error("AI returned a malformed guide: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Failed to analyze the cube images with the AI model: {0}")]
    Transport(#[from] TransportError),
    #[error("AI returned no solution content.")]
    Empty,
    #[error("AI returned a malformed solution: {0}")]
    Malformed(String),
}

impl From<ReplyError> for GenerationError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Empty => GenerationError::Empty,
            ReplyError::Malformed(reason) => GenerationError::Malformed(reason),
        }
    }
}

impl From<ReplyError> for SolveError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Empty => SolveError::Empty,
            ReplyError::Malformed(reason) => SolveError::Malformed(reason),
        }
    }
}

impl GenerationError {
    pub fn user_message(&self) -> &'static str {
        GUIDE_ERROR_MESSAGE
    }
}

impl SolveError {
    pub fn user_message(&self) -> &'static str {
        SOLVE_ERROR_MESSAGE
    }
}

#[async_trait]
pub trait GuideService: Send + Sync {
    async fn request_guide(
        &self,
        method: LearningMethod,
        difficulty: Difficulty,
    ) -> Result<Vec<ContentBlock>, GenerationError>;
}

#[async_trait]
pub trait SolveService: Send + Sync {
    async fn request_solution(
        &self,
        faces: &FaceImages,
        method: LearningMethod,
    ) -> Result<Vec<ContentBlock>, SolveError>;
}
