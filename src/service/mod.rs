//! Upstream generative-text service integration

pub(crate) mod gemini;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

pub use gemini::GeminiClient;

/// Boxed future returned by [`TextGenerator::generate`]
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Capability interface over the upstream text-generation service
///
/// The handler only ever needs "generate text from this prompt", so tests can
/// substitute a double without any HTTP involved.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: String) -> GenerateFuture<'_>;
}
