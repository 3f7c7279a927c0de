#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// First assistant message shown in every new transcript.
pub const GREETING: &str = "Hello, I am a configuration of chatGPT-4. I am here to help translate and interpret some of the statistical results generated from the causal network.";

/// State for the pinned assistant chat.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub connection: ChatConnection,
    /// Sent with every message as `sendUserActions`.
    pub include_context: bool,
    /// A user message was sent and no reply has arrived since.
    pub awaiting_reply: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, GREETING)],
            connection: ChatConnection::Disconnected,
            include_context: true,
            awaiting_reply: false,
        }
    }
}

impl ChatState {
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::User, content));
        self.awaiting_reply = true;
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::Assistant, content));
        self.awaiting_reply = false;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatConnection {
    Connecting,
    Connected,
    #[default]
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single transcript entry.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }
}
