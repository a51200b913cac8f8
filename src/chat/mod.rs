pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

pub use telegram::TelegramClient;

/// Delivers a text reply to a chat
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}
