// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body as sent by any widget version. Fields stay untyped JSON; the
/// extraction service decides which of them are usable.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: Option<Value>,
    pub input: Option<Value>,
    pub text: Option<Value>,

    pub slug: Option<Value>,
    #[serde(rename = "propertyId")]
    pub property_id: Option<Value>,

    #[serde(rename = "sessionId", alias = "session_id")]
    pub session_id: Option<Value>,

    pub path: Option<Value>,
    pub metadata: Option<Value>,
}

impl ChatRequest {
    pub fn path_str(&self) -> Option<&str> {
        self.path.as_ref()?.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Body posted to the upstream webhook.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage<'a> {
    pub message: &'a str,
    pub slug: &'a str,
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
    pub path: Option<&'a str>,
    pub metadata: Option<&'a Value>,
}
