use super::response::ResponsePayload;
use crate::domain::a002_uploaded_file::UploadTracker;
use crate::enums::StudyTab;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder title of a session without messages
pub const NEW_CHAT_TITLE: &str = "New Chat";
/// Characters of the first message kept in the derived title
pub const TITLE_MAX_CHARS: usize = 30;
/// Simulated assistant "thinking" time, ms
pub const REPLY_DELAY_MS: u32 = 2000;

// ============================================================================
// ID Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatSessionId(pub Uuid);

impl ChatSessionId {
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid chat session id: {e}"))
    }
}

impl fmt::Display for ChatSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Message
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of a conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResponsePayload>,
    /// Assistant turn that could not be produced
    #[serde(default)]
    pub failed: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new_v7(),
            role: ChatRole::User,
            content: content.into(),
            created_at: Utc::now(),
            payload: None,
            failed: false,
        }
    }

    pub fn assistant(content: impl Into<String>, payload: ResponsePayload) -> Self {
        Self {
            id: MessageId::new_v7(),
            role: ChatRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            payload: Some(payload),
            failed: false,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            id: MessageId::new_v7(),
            role: ChatRole::Assistant,
            content: reason.into(),
            created_at: Utc::now(),
            payload: None,
            failed: true,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }

    /// Tab the attached payload answers
    pub fn response_type(&self) -> Option<StudyTab> {
        self.payload.as_ref().map(ResponsePayload::tab)
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: ChatSessionId,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub uploads: UploadTracker,
    pub active_tab: StudyTab,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: ChatSessionId::new_v7(),
            title: NEW_CHAT_TITLE.to_string(),
            messages: Vec::new(),
            uploads: UploadTracker::inline(),
            active_tab: StudyTab::default(),
            created_at: Utc::now(),
        }
    }

    pub fn has_placeholder_title(&self) -> bool {
        self.title == NEW_CHAT_TITLE
    }

    /// Append a user turn, deriving the title while it is still the placeholder
    pub fn push_user_message(&mut self, content: &str) {
        if self.has_placeholder_title() {
            self.title = derive_title(content);
        }
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Letter shown for the session in the collapsed sidebar
    pub fn initial(&self) -> char {
        self.title
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('N')
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// First `TITLE_MAX_CHARS` characters followed by "..."
pub fn derive_title(message: &str) -> String {
    let head: String = message.chars().take(TITLE_MAX_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = ChatSession::new();
        assert_eq!(session.title, NEW_CHAT_TITLE);
        assert!(session.messages.is_empty());
        assert!(session.uploads.is_empty());
        assert_eq!(session.uploads.max_files(), 1);
        assert_eq!(session.active_tab, StudyTab::ShortNote);
    }

    #[test]
    fn test_title_from_first_message_only() {
        let mut session = ChatSession::new();
        session.push_user_message("Explain the causes of the French Revolution please");
        assert_eq!(session.title, "Explain the causes of the Fren...");

        session.push_user_message("and Napoleon");
        assert_eq!(session.title, "Explain the causes of the Fren...");
        assert_eq!(session.messages.len(), 2);
    }

    #[test]
    fn test_derive_title_counts_chars() {
        assert_eq!(derive_title("hi"), "hi...");
        let cyrillic = "Привет".repeat(10);
        let title = derive_title(&cyrillic);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }

    #[test]
    fn test_session_id_round_trip() {
        let a = ChatSessionId::new_v7();
        let b = ChatSessionId::new_v7();
        assert_ne!(a, b);
        assert_eq!(ChatSessionId::from_string(&a.as_string()), Ok(a));
        assert!(ChatSessionId::from_string("nope").is_err());
    }

    #[test]
    fn test_message_serialization() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("payload").is_none());
        assert!(json.get("createdAt").is_some());

        let failed = ChatMessage::failed("Assistant is unavailable");
        assert!(failed.failed);
        assert_eq!(failed.response_type(), None);
    }
}
