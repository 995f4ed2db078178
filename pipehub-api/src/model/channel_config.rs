use serde::Deserialize;
use serde::Serialize;

/// Credentials of the outbound notification channels.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// WeChat Work corporation id.
    pub corp_id: String,
    /// WeChat Work application (agent) id.
    pub agent_id: i64,
    /// WeChat Work application secret.
    pub secret: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
}
