use contracts::domain::a001_chat_session::aggregate::{ChatSessionId, REPLY_DELAY_MS};
use contracts::domain::a001_chat_session::store::{
    SendOutcome, SessionStore, NO_SESSION_HINT, SESSION_CREATED_HINT,
};
use contracts::domain::a002_uploaded_file::FileMeta;
use contracts::enums::StudyTab;
use contracts::shared::validation::{MessageForm, ValidationError};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::domain::a002_uploaded_file::ui::simulation::run_upload;
use crate::shared::task_registry::{spawn_owned, TaskRegistry};

/// Dashboard state shared by the sidebar, the chat view and the upload page
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub store: RwSignal<SessionStore>,
    pub left_open: RwSignal<bool>,
    /// One-line hint above the chat input
    pub notice: RwSignal<Option<String>>,
    /// Rejections from the last attach attempt
    pub upload_errors: RwSignal<Vec<String>>,
    pub tasks: StoredValue<TaskRegistry>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            store: RwSignal::new(SessionStore::new()),
            left_open: RwSignal::new(true),
            notice: RwSignal::new(None),
            upload_errors: RwSignal::new(Vec::new()),
            tasks: StoredValue::new(TaskRegistry::new()),
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    pub fn is_processing(&self) -> bool {
        self.store.with(|s| s.is_processing())
    }

    pub fn new_chat(&self) {
        let id = self.store.try_update(|s| s.create_session());
        self.notice.set(None);
        self.upload_errors.set(Vec::new());
        if let Some(id) = id {
            log::info!("Chat session {id} created");
        }
    }

    /// Validate and send `text` on the current session.
    ///
    /// Schedules the simulated assistant reply under the session id.
    pub fn send_message(&self, text: String) -> Result<(), ValidationError> {
        let form = MessageForm::new(text).validate()?;
        let Some(outcome) = self.store.try_update(|s| s.send_message(&form.content)) else {
            return Ok(());
        };

        match outcome {
            SendOutcome::SessionCreated(id) => {
                log::info!("Message dropped, chat session {id} opened first");
                self.notice.set(Some(SESSION_CREATED_HINT.to_string()));
            }
            SendOutcome::Pending(pending) => {
                self.notice.set(None);
                let store = self.store;
                spawn_owned(self.tasks, pending.session_id.to_string(), move |handle| async move {
                    TimeoutFuture::new(REPLY_DELAY_MS).await;
                    if handle.is_cancelled() {
                        return;
                    }
                    let applied = store.try_update(|s| s.complete_reply(&pending));
                    if applied != Some(true) {
                        log::warn!("Reply for chat session {} discarded", pending.session_id);
                    }
                });
            }
        }
        Ok(())
    }

    pub fn select_tab(&self, tab: StudyTab) {
        self.store.update(|s| s.select_tab(tab));
    }

    pub fn load_session(&self, id: ChatSessionId) {
        if self.store.try_update(|s| s.load_session(id)) == Some(true) {
            self.notice.set(None);
            self.upload_errors.set(Vec::new());
        }
    }

    pub fn rename_session(&self, id: ChatSessionId, title: &str) {
        self.store.update(|s| {
            s.rename_session(id, title);
        });
    }

    /// Remove the session and cancel its pending reply and uploads
    pub fn delete_session(&self, id: ChatSessionId) {
        let file_ids: Vec<String> = self.store.with_untracked(|s| {
            s.find(id)
                .into_iter()
                .chain(s.current().filter(|c| c.id == id))
                .flat_map(|session| session.uploads.files().iter().map(|f| f.id.clone()))
                .collect()
        });
        self.tasks.update_value(|tasks| {
            tasks.cancel(&id.to_string());
            for file_id in &file_ids {
                tasks.cancel(file_id);
            }
        });
        self.store.update(|s| {
            s.delete_session(id);
        });
        log::info!("Chat session {id} deleted");
    }

    /// Admit files into the current session and start their simulated upload
    pub fn attach_files(&self, candidates: Vec<FileMeta>) {
        let Some(session_id) = self.store.with_untracked(|s| s.current_id()) else {
            self.notice.set(Some(NO_SESSION_HINT.to_string()));
            return;
        };
        let Some(report) = self.store.try_update(|s| s.admit_files(candidates)).flatten() else {
            return;
        };

        for rejected in &report.rejected {
            log::warn!("File rejected: {rejected}");
        }
        self.upload_errors.set(report.error_messages());

        let store = self.store;
        for file_id in report.admitted {
            log::info!("File {file_id} admitted to chat session {session_id}");
            spawn_owned(self.tasks, file_id.clone(), move |handle| {
                run_upload(
                    file_id,
                    handle,
                    move |id, inc| store.try_update(|s| s.advance_upload(session_id, id, inc)).flatten(),
                    move |id| store.try_update(|s| s.finish_upload(session_id, id)).flatten(),
                )
            });
        }
    }

    pub fn remove_file(&self, file_id: &str) {
        self.tasks.update_value(|tasks| {
            tasks.cancel(file_id);
        });
        self.store.update(|s| {
            s.remove_file(file_id);
        });
    }

    /// Stop every timer and forget all sessions
    pub fn reset(&self) {
        let cancelled = self.tasks.try_update_value(|tasks| tasks.cancel_all());
        log::info!("Cancelled {} pending tasks", cancelled.unwrap_or(0));
        self.store.set(SessionStore::new());
        self.notice.set(None);
        self.upload_errors.set(Vec::new());
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
