//! Shared constants used across the application

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;

/// Completion length cap sent with every completion request.
pub const MAX_TOKENS: u32 = 1000;

/// API version embedded in the deployment URL's query string.
pub const API_VERSION: &str = "2024-08-01-preview";

/// System message seeding every transcript. Replayed to the service on each
/// turn but never rendered in the transcript view.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant created to help users with a variety of tasks, \
including answering questions, providing explanations, and offering guidance. \
Respond in a friendly and professional tone.";
