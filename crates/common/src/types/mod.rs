use serde::{Deserialize, Serialize};

/// Body returned by the root liveness route.
pub const ROOT_ACK: &str = "API";

/// `{"message": ...}` envelope used by every JSON status response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
