pub mod aggregate;
pub mod response;
pub mod store;

pub use aggregate::{ChatMessage, ChatRole, ChatSession, ChatSessionId, MessageId};
pub use response::{generate_reply, ResponsePayload};
pub use store::{PendingReply, SendOutcome, SessionStore};
