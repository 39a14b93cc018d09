//! Chat dashboard - View Model

use contracts::domain::a001_chat_session::aggregate::NEW_CHAT_TITLE;
use contracts::domain::a001_chat_session::ChatMessage;
use contracts::domain::a002_uploaded_file::UploadedFile;
use contracts::enums::StudyTab;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

#[derive(Clone, Copy)]
pub struct ChatDashboardVm {
    pub ctx: AppGlobalContext,
    pub show_uploader: RwSignal<bool>,
    pub messages: Signal<Vec<ChatMessage>>,
    pub files: Signal<Vec<UploadedFile>>,
    pub title: Signal<String>,
    pub active_tab: Signal<StudyTab>,
    /// Reply pending for the session on screen
    pub thinking: Signal<bool>,
    /// Inline uploader holds its single file
    pub uploads_full: Signal<bool>,
}

impl ChatDashboardVm {
    pub fn new(ctx: AppGlobalContext) -> Self {
        let store = ctx.store;
        Self {
            ctx,
            show_uploader: RwSignal::new(false),
            messages: Signal::derive(move || {
                store.with(|s| s.current().map(|c| c.messages.clone()).unwrap_or_default())
            }),
            files: Signal::derive(move || {
                store.with(|s| {
                    s.current()
                        .map(|c| c.uploads.files().to_vec())
                        .unwrap_or_default()
                })
            }),
            title: Signal::derive(move || {
                store.with(|s| {
                    s.current()
                        .map(|c| c.title.clone())
                        .unwrap_or_else(|| NEW_CHAT_TITLE.to_string())
                })
            }),
            active_tab: Signal::derive(move || store.with(|s| s.active_tab())),
            thinking: Signal::derive(move || {
                store.with(|s| s.current_id().is_some_and(|id| s.has_pending(id)))
            }),
            uploads_full: Signal::derive(move || {
                store.with(|s| {
                    s.current()
                        .is_some_and(|c| c.uploads.remaining_capacity() == 0)
                })
            }),
        }
    }

    pub fn toggle_uploader(&self) {
        self.show_uploader.update(|open| *open = !*open);
    }

    pub fn send(&self, content: String) {
        if let Err(e) = self.ctx.send_message(content) {
            log::warn!("Message not sent: {e}");
        }
    }
}
