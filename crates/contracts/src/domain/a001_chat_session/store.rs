//! Session store: the session list, the current session and pending replies

use super::aggregate::{ChatMessage, ChatSession, ChatSessionId, MessageId};
use super::response::generate_reply;
use crate::domain::a002_uploaded_file::{AdmitReport, FileMeta, UploadStatus, UploadedFile};
use crate::enums::StudyTab;

/// Hint shown when a file is attached outside of a session
pub const NO_SESSION_HINT: &str = "Start a new chat before attaching files";
/// Hint shown when the first send only opened a session
pub const SESSION_CREATED_HINT: &str = "New chat started, send your message again";

/// Assistant turn scheduled by `send_message`
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub session_id: ChatSessionId,
    /// User message the reply answers
    pub ticket: MessageId,
    /// Tab active when the message was sent
    pub tab: StudyTab,
    pub prompt: String,
    /// Session right after the user message was appended
    pub snapshot: ChatSession,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// There was no current session: one was opened and the message dropped
    SessionCreated(ChatSessionId),
    Pending(PendingReply),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    /// Persisted sessions, most recent first
    sessions: Vec<ChatSession>,
    current: Option<ChatSession>,
    /// Tab used when there is no current session
    active_tab: StudyTab,
    pending: Vec<(ChatSessionId, MessageId)>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current(&self) -> Option<&ChatSession> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<ChatSessionId> {
        self.current.as_ref().map(|s| s.id)
    }

    pub fn active_tab(&self) -> StudyTab {
        self.active_tab
    }

    pub fn find(&self, id: ChatSessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Whether a reply for the current session is still outstanding
    pub fn is_processing(&self) -> bool {
        match self.current_id() {
            Some(id) => self.pending.iter().any(|(sid, _)| *sid == id),
            None => false,
        }
    }

    pub fn has_pending(&self, id: ChatSessionId) -> bool {
        self.pending.iter().any(|(sid, _)| *sid == id)
    }

    /// Open an empty session and make it current. It reaches the list with
    /// its first assistant reply.
    pub fn create_session(&mut self) -> ChatSessionId {
        let session = ChatSession::new();
        let id = session.id;
        self.active_tab = session.active_tab;
        self.current = Some(session);
        id
    }

    pub fn send_message(&mut self, text: &str) -> SendOutcome {
        let tab = self.active_tab;
        let Some(session) = self.current.as_mut() else {
            return SendOutcome::SessionCreated(self.create_session());
        };

        session.push_user_message(text);
        let ticket = session
            .last_message()
            .map(|m| m.id)
            .unwrap_or_else(MessageId::new_v7);
        let pending = PendingReply {
            session_id: session.id,
            ticket,
            tab,
            prompt: text.to_string(),
            snapshot: session.clone(),
        };
        self.pending.push((pending.session_id, ticket));
        SendOutcome::Pending(pending)
    }

    /// Append the generated assistant turn for `pending`.
    ///
    /// Returns false when the reply is stale (its session was deleted).
    pub fn complete_reply(&mut self, pending: &PendingReply) -> bool {
        let reply = generate_reply(pending.tab, &pending.prompt);
        let message = ChatMessage::assistant(reply.content, reply.payload);
        self.settle(pending, message)
    }

    /// Record the pending turn as a failed assistant message
    pub fn fail_reply(&mut self, pending: &PendingReply, reason: &str) -> bool {
        self.settle(pending, ChatMessage::failed(reason))
    }

    fn settle(&mut self, pending: &PendingReply, message: ChatMessage) -> bool {
        let key = (pending.session_id, pending.ticket);
        let Some(pos) = self.pending.iter().position(|p| *p == key) else {
            return false;
        };
        self.pending.remove(pos);

        if let Some(current) = self.current.as_mut().filter(|c| c.id == pending.session_id) {
            restore_turns(current, &pending.snapshot);
            current.push_message(message);
            current.active_tab = pending.tab;
            let updated = current.clone();
            self.upsert(updated);
        } else if let Some(listed) = self.sessions.iter_mut().find(|s| s.id == pending.session_id) {
            restore_turns(listed, &pending.snapshot);
            listed.push_message(message);
            listed.active_tab = pending.tab;
        } else {
            let mut session = pending.snapshot.clone();
            session.push_message(message);
            session.active_tab = pending.tab;
            self.sessions.insert(0, session);
        }
        true
    }

    fn upsert(&mut self, session: ChatSession) {
        match self.sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session,
            None => self.sessions.insert(0, session),
        }
    }

    pub fn select_tab(&mut self, tab: StudyTab) {
        self.active_tab = tab;
        if let Some(current) = self.current.as_mut() {
            current.active_tab = tab;
        }
    }

    /// Make a listed session current and restore its tab
    pub fn load_session(&mut self, id: ChatSessionId) -> bool {
        let Some(session) = self.find(id).cloned() else {
            return false;
        };
        self.active_tab = session.active_tab;
        self.current = Some(session);
        true
    }

    /// Returns true when the current session was cleared
    pub fn delete_session(&mut self, id: ChatSessionId) -> bool {
        self.sessions.retain(|s| s.id != id);
        self.pending.retain(|(sid, _)| *sid != id);
        if self.current_id() == Some(id) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn rename_session(&mut self, id: ChatSessionId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let mut found = false;
        if let Some(s) = self.sessions.iter_mut().find(|s| s.id == id) {
            s.title = title.to_string();
            found = true;
        }
        if let Some(c) = self.current.as_mut().filter(|c| c.id == id) {
            c.title = title.to_string();
            found = true;
        }
        found
    }

    /// Replace the current session's file set
    pub fn attach_files(&mut self, files: Vec<UploadedFile>) -> bool {
        match self.current.as_mut() {
            Some(current) => {
                current.uploads.replace(files);
                true
            }
            None => false,
        }
    }

    /// Validate and add files to the current session. `None` without a session.
    pub fn admit_files(&mut self, candidates: Vec<FileMeta>) -> Option<AdmitReport> {
        self.current
            .as_mut()
            .map(|current| current.uploads.admit(candidates))
    }

    pub fn remove_file(&mut self, file_id: &str) -> Option<UploadedFile> {
        let current = self.current.as_mut()?;
        let removed = current.uploads.remove(file_id);
        let session_id = current.id;
        if let Some(listed) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            listed.uploads.remove(file_id);
        }
        removed
    }

    /// Progress tick for a file of `session_id`, wherever the session lives
    pub fn advance_upload(
        &mut self,
        session_id: ChatSessionId,
        file_id: &str,
        increment: f64,
    ) -> Option<UploadStatus> {
        let mut status = None;
        if let Some(c) = self.current.as_mut().filter(|c| c.id == session_id) {
            status = c.uploads.advance(file_id, increment);
        }
        if let Some(s) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            let listed = s.uploads.advance(file_id, increment);
            status = status.or(listed);
        }
        status
    }

    pub fn finish_upload(&mut self, session_id: ChatSessionId, file_id: &str) -> Option<UploadStatus> {
        let mut status = None;
        if let Some(c) = self.current.as_mut().filter(|c| c.id == session_id) {
            status = c.uploads.finish_processing(file_id);
        }
        if let Some(s) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            let listed = s.uploads.finish_processing(file_id);
            status = status.or(listed);
        }
        status
    }
}

/// Append the snapshot's messages that `target` lost when another copy of
/// the session replaced it.
fn restore_turns(target: &mut ChatSession, snapshot: &ChatSession) {
    for message in &snapshot.messages {
        if !target.messages.iter().any(|m| m.id == message.id) {
            target.push_message(message.clone());
        }
    }
    if target.has_placeholder_title() && !snapshot.has_placeholder_title() {
        target.title = snapshot.title.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_chat_session::aggregate::ChatRole;
    use crate::domain::a001_chat_session::response::ResponsePayload;

    fn pending(outcome: SendOutcome) -> PendingReply {
        match outcome {
            SendOutcome::Pending(p) => p,
            other => panic!("expected pending reply, got {other:?}"),
        }
    }

    #[test]
    fn test_send_without_session_creates_empty_one() {
        let mut store = SessionStore::new();
        let outcome = store.send_message("hello");

        let id = match outcome {
            SendOutcome::SessionCreated(id) => id,
            other => panic!("unexpected {other:?}"),
        };
        let current = store.current().unwrap();
        assert_eq!(current.id, id);
        assert!(current.messages.is_empty());
        assert!(store.sessions().is_empty());
        assert!(!store.is_processing());
    }

    #[test]
    fn test_reply_persists_session() {
        let mut store = SessionStore::new();
        let id = store.create_session();
        let ticket = pending(store.send_message("photosynthesis"));
        assert!(store.is_processing());
        assert_eq!(store.current().unwrap().messages.len(), 1);
        assert!(store.sessions().is_empty());

        assert!(store.complete_reply(&ticket));
        assert!(!store.is_processing());
        let current = store.current().unwrap();
        assert_eq!(current.messages.len(), 2);
        assert_eq!(current.title, "photosynthesis...");
        assert!(matches!(
            current.messages[1].payload,
            Some(ResponsePayload::ShortNote { .. })
        ));
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.sessions()[0].id, id);

        // second reply updates in place
        let ticket = pending(store.send_message("chlorophyll"));
        store.complete_reply(&ticket);
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.sessions()[0].messages.len(), 4);
    }

    #[test]
    fn test_reply_uses_tab_at_send_time() {
        let mut store = SessionStore::new();
        store.create_session();
        store.select_tab(StudyTab::Reference);
        let ticket = pending(store.send_message("dna"));
        store.select_tab(StudyTab::Question);
        store.complete_reply(&ticket);

        let reply = store.current().unwrap().last_message().unwrap();
        assert_eq!(reply.response_type(), Some(StudyTab::Reference));
    }

    #[test]
    fn test_new_sessions_are_prepended() {
        let mut store = SessionStore::new();
        let first = store.create_session();
        let t = pending(store.send_message("one"));
        store.complete_reply(&t);
        let second = store.create_session();
        let t = pending(store.send_message("two"));
        store.complete_reply(&t);

        let ids: Vec<_> = store.sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_late_reply_never_replaces_current() {
        let mut store = SessionStore::new();
        let first = store.create_session();
        let ticket = pending(store.send_message("slow question"));

        let second = store.create_session();
        assert!(store.complete_reply(&ticket));

        assert_eq!(store.current_id(), Some(second));
        assert!(store.current().unwrap().messages.is_empty());
        let listed = store.find(first).unwrap();
        assert_eq!(listed.messages.len(), 2);
    }

    #[test]
    fn test_reply_for_deleted_session_is_dropped() {
        let mut store = SessionStore::new();
        let id = store.create_session();
        let ticket = pending(store.send_message("hi"));
        assert!(store.delete_session(id));

        assert!(!store.complete_reply(&ticket));
        assert!(store.current().is_none());
        assert!(store.sessions().is_empty());
    }

    #[test]
    fn test_delete_other_session_keeps_current() {
        let mut store = SessionStore::new();
        let old = store.create_session();
        let t = pending(store.send_message("old"));
        store.complete_reply(&t);
        let current = store.create_session();

        assert!(!store.delete_session(old));
        assert_eq!(store.current_id(), Some(current));
        assert!(store.sessions().is_empty());

        assert!(store.delete_session(current));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_fail_reply_appends_failed_message() {
        let mut store = SessionStore::new();
        store.create_session();
        let ticket = pending(store.send_message("hi"));
        assert!(store.fail_reply(&ticket, "Assistant is unavailable"));

        let last = store.current().unwrap().last_message().unwrap();
        assert!(last.failed);
        assert_eq!(last.content, "Assistant is unavailable");
        assert!(!store.is_processing());
    }

    #[test]
    fn test_tabs_follow_sessions() {
        let mut store = SessionStore::new();
        store.select_tab(StudyTab::Question);
        assert_eq!(store.active_tab(), StudyTab::Question);

        let id = store.create_session();
        assert_eq!(store.active_tab(), StudyTab::ShortNote);
        store.select_tab(StudyTab::Reference);
        let t = pending(store.send_message("x"));
        store.complete_reply(&t);

        store.create_session();
        assert!(store.load_session(id));
        assert_eq!(store.active_tab(), StudyTab::Reference);
        assert_eq!(store.current().unwrap().active_tab, StudyTab::Reference);
    }

    #[test]
    fn test_rename_session() {
        let mut store = SessionStore::new();
        let id = store.create_session();
        let t = pending(store.send_message("x"));
        store.complete_reply(&t);

        assert!(store.rename_session(id, "  Biology  "));
        assert_eq!(store.find(id).unwrap().title, "Biology");
        assert_eq!(store.current().unwrap().title, "Biology");
        assert!(!store.rename_session(id, "   "));
    }

    #[test]
    fn test_files_need_a_session() {
        let mut store = SessionStore::new();
        let pdf = FileMeta::new("a.pdf", "application/pdf", 1024);
        assert!(store.admit_files(vec![pdf.clone()]).is_none());

        let sid = store.create_session();
        let report = store.admit_files(vec![pdf.clone(), pdf]).unwrap();
        assert_eq!(report.admitted.len(), 1);
        assert_eq!(report.rejected.len(), 1);

        let file_id = report.admitted[0].clone();
        assert_eq!(
            store.advance_upload(sid, &file_id, 100.0),
            Some(UploadStatus::Processing)
        );
        assert_eq!(
            store.finish_upload(sid, &file_id),
            Some(UploadStatus::Completed)
        );
        assert!(store.remove_file(&file_id).is_some());
        assert!(store.current().unwrap().uploads.is_empty());
        assert_eq!(store.advance_upload(sid, &file_id, 5.0), None);
    }

    #[test]
    fn test_attach_files_replaces_set() {
        let mut store = SessionStore::new();
        assert!(!store.attach_files(Vec::new()));
        store.create_session();
        store.admit_files(vec![FileMeta::new("a.txt", "text/plain", 10)]);

        assert!(store.attach_files(Vec::new()));
        assert!(store.current().unwrap().uploads.is_empty());
    }

    fn user_turns(session: &ChatSession) -> Vec<&str> {
        session
            .messages
            .iter()
            .filter(|m| m.is_user())
            .map(|m| m.content.as_str())
            .collect()
    }

    fn roles(session: &ChatSession) -> Vec<ChatRole> {
        session.messages.iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_reply_after_switching_keeps_user_turn() {
        let mut store = SessionStore::new();
        let a = store.create_session();
        let t = pending(store.send_message("a1"));
        store.complete_reply(&t);
        let b = store.create_session();
        let t = pending(store.send_message("b1"));
        store.complete_reply(&t);

        assert!(store.load_session(a));
        store.select_tab(StudyTab::Question);
        let t = pending(store.send_message("a2"));
        assert!(store.load_session(b));
        assert!(store.complete_reply(&t));

        let listed = store.find(a).unwrap();
        assert_eq!(user_turns(listed), vec!["a1", "a2"]);
        assert_eq!(
            roles(listed),
            vec![ChatRole::User, ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
        );
        assert_eq!(listed.active_tab, StudyTab::Question);
        assert_eq!(store.current_id(), Some(b));

        assert!(store.load_session(a));
        assert_eq!(store.active_tab(), StudyTab::Question);
    }

    #[test]
    fn test_two_pending_replies_keep_both_turns() {
        let mut store = SessionStore::new();
        let id = store.create_session();
        let first = pending(store.send_message("m1"));
        let second = pending(store.send_message("m2"));
        store.create_session();

        assert!(store.complete_reply(&first));
        assert!(store.complete_reply(&second));

        let listed = store.find(id).unwrap();
        assert_eq!(user_turns(listed), vec!["m1", "m2"]);
        assert_eq!(listed.messages.len(), 4);
        assert_eq!(listed.title, "m1...");
    }

    #[test]
    fn test_reply_after_returning_restores_turn() {
        let mut store = SessionStore::new();
        let a = store.create_session();
        let t = pending(store.send_message("a1"));
        store.complete_reply(&t);

        let t = pending(store.send_message("a2"));
        store.create_session();
        assert!(store.load_session(a));
        assert!(store.complete_reply(&t));

        let current = store.current().unwrap();
        assert_eq!(user_turns(current), vec!["a1", "a2"]);
        assert_eq!(store.find(a).unwrap().messages.len(), 4);
    }
}
