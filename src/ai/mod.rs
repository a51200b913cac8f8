pub mod gemini;
pub mod prompt;

use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;

/// Fixed framing sent with every pricing prompt
pub const SYSTEM_INSTRUCTION: &str = "You are an experienced hotel manager. \
Using the listings below, all from the same area as your rental house, suggest a nightly price \
for each check-in date they cover. Reply with one line per date and nothing else, \
formatted as date: price. >>> Example: 2025-01-14: 112.99 >>> \
Rental house: 3 rooms. 2 double-bed rooms. 1 dual single-bed room. 2 bathrooms. No pool.";

/// Generative model that turns a listing summary into price suggestions
#[async_trait]
pub trait PriceAdvisor: Send + Sync {
    /// Reply text for the prompt, returned verbatim
    async fn generate(&self, prompt: &str) -> Result<String>;
}
