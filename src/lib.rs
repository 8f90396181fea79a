//! edital-tutor library - study schedule and quiz generation from exam announcements

pub mod config;
pub mod error;
pub mod server;
pub mod service;
pub mod tutor;

// Re-export commonly used types
pub use config::{Config, ConfigOptions, DEFAULT_GEMINI_MODEL, ENV_GEMINI_API_KEY};
pub use error::ApiError;
pub use server::ApiServer;
pub use service::{GeminiClient, TextGenerator};
pub use tutor::{Action, GenerateRequest, Tutor};
