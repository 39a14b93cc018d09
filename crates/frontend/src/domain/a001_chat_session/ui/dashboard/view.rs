//! Chat dashboard - View Component

use contracts::domain::a002_uploaded_file::FileMeta;
use contracts::enums::StudyTab;
use leptos::prelude::*;
use thaw::*;

use super::view_model::ChatDashboardVm;
use crate::domain::a001_chat_session::ui::{ChatInput, MessageList, StudyTabs};
use crate::domain::a002_uploaded_file::ui::{FileDropzone, RejectionList, UploadedFileList};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn ChatDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let vm = ChatDashboardVm::new(ctx);

    let greeting = move || {
        auth.state.with(|s| {
            s.profile
                .as_ref()
                .map(|p| p.greeting_name().to_string())
                .unwrap_or_else(|| "User".to_string())
        })
    };

    let on_send = Callback::new(move |content: String| vm.send(content));
    let on_attach = Callback::new(move |_: ()| vm.toggle_uploader());
    let on_select_tab = Callback::new(move |tab: StudyTab| ctx.select_tab(tab));
    let on_files = Callback::new(move |files: Vec<FileMeta>| ctx.attach_files(files));
    let on_remove = Callback::new(move |file_id: String| ctx.remove_file(&file_id));

    view! {
        <div class="chat-dashboard">
            <Flex
                justify=FlexJustify::SpaceBetween
                align=FlexAlign::Center
                style="padding: 12px 24px; border-bottom: 1px solid var(--colorNeutralStroke2);"
            >
                <h2 class="chat-dashboard__title">{move || vm.title.get()}</h2>
                <StudyTabs active=vm.active_tab on_select=on_select_tab />
            </Flex>

            <Show
                when=move || !vm.messages.with(Vec::is_empty) || vm.thinking.get()
                fallback=move || view! {
                    <div class="chat-dashboard__welcome">
                        <h1>{move || format!("Hello, {}", greeting())}</h1>
                        <p>"Upload a document or ask a question to start studying"</p>
                    </div>
                }
            >
                <MessageList messages=vm.messages thinking=vm.thinking />
            </Show>

            {move || ctx.notice.get().map(|notice| view! {
                <MessageBar intent=MessageBarIntent::Info>
                    <span>{notice}</span>
                </MessageBar>
            })}

            <ChatInput on_send=on_send on_attach=on_attach>
                <Show when=move || !vm.files.with(Vec::is_empty)>
                    <UploadedFileList files=vm.files on_remove=on_remove compact=true />
                </Show>
                <Show when=move || vm.show_uploader.get()>
                    <div class="chat-input__uploader">
                        <FileDropzone
                            input_id="chat-file-input"
                            on_files=on_files
                            disabled=vm.uploads_full
                            compact=true
                        />
                        <RejectionList errors=ctx.upload_errors />
                    </div>
                </Show>
            </ChatInput>

            <button
                class="fab"
                title="New chat"
                on:click=move |_| {
                    vm.show_uploader.set(false);
                    ctx.new_chat();
                }
            >
                {icon("plus")}
            </button>
        </div>
    }
}
