//! Chat history sidebar with per-item context menu

use contracts::domain::a001_chat_session::ChatSessionId;
use leptos::prelude::*;
use thaw::*;

use super::user_menu::UserMenu;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::gate::{AppRoute, Navigator, RouterNavigator};

/// Context menu actions of a chat item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemAction {
    Share,
    Rename,
    Archive,
    Delete,
}

impl ItemAction {
    fn all() -> [ItemAction; 4] {
        [
            ItemAction::Share,
            ItemAction::Rename,
            ItemAction::Archive,
            ItemAction::Delete,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ItemAction::Share => "Share",
            ItemAction::Rename => "Rename",
            ItemAction::Archive => "Archive",
            ItemAction::Delete => "Delete",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ItemAction::Share => "share",
            ItemAction::Rename => "edit",
            ItemAction::Archive => "archive",
            ItemAction::Delete => "trash",
        }
    }
}

#[component]
pub fn ChatSidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let nav = RouterNavigator::new();

    let collapsed = move || !ctx.left_open.get();
    let open_menu = RwSignal::new(Option::<ChatSessionId>::None);

    let rename_open = RwSignal::new(false);
    let rename_target = RwSignal::new(Option::<ChatSessionId>::None);
    let rename_value = RwSignal::new(String::new());

    let run_action = move |id: ChatSessionId, action: ItemAction| {
        open_menu.set(None);
        match action {
            ItemAction::Rename => {
                let title = ctx
                    .store
                    .with_untracked(|s| s.find(id).map(|c| c.title.clone()))
                    .unwrap_or_default();
                rename_target.set(Some(id));
                rename_value.set(title);
                rename_open.set(true);
            }
            ItemAction::Delete => ctx.delete_session(id),
            ItemAction::Share | ItemAction::Archive => {
                log::info!("{} requested for chat session {id}", action.label());
            }
        }
    };

    let confirm_rename = move |_| {
        if let Some(id) = rename_target.get_untracked() {
            ctx.rename_session(id, &rename_value.get_untracked());
        }
        rename_open.set(false);
    };

    let new_chat = move |_| {
        ctx.new_chat();
        nav.navigate(&AppRoute::Dashboard);
    };

    let sessions = move || ctx.store.with(|s| s.sessions().to_vec());
    let current_id = move || ctx.store.with(|s| s.current_id());

    view! {
        <div class="app-sidebar" class:app-sidebar--collapsed=collapsed>
            <div class="app-sidebar__header">
                <Show when=move || !collapsed()>
                    <a class="app-sidebar__brand" href="/dashboard">"mYFeel"</a>
                </Show>
                <button
                    class="icon-button"
                    title=move || if collapsed() { "Expand sidebar" } else { "Collapse sidebar" }
                    on:click=move |_| ctx.toggle_left()
                >
                    {move || if collapsed() { icon("chevron-right") } else { icon("chevron-left") }}
                </button>
            </div>

            <div class="app-sidebar__actions">
                <button class="app-sidebar__item app-sidebar__item--primary" on:click=new_chat>
                    <div class="app-sidebar__item-content">
                        {icon("plus")}
                        <Show when=move || !collapsed()>
                            <span>"New Chat"</span>
                        </Show>
                    </div>
                </button>
                <a class="app-sidebar__item" href="/dashboard/upload">
                    <div class="app-sidebar__item-content">
                        {icon("upload")}
                        <Show when=move || !collapsed()>
                            <span>"Upload documents"</span>
                        </Show>
                    </div>
                </a>
            </div>

            <div class="app-sidebar__content">
                <Show when=move || !collapsed()>
                    <div class="app-sidebar__section-title">"Recent chats"</div>
                </Show>
                <Show
                    when=move || !ctx.store.with(|s| s.sessions().is_empty())
                    fallback=move || view! {
                        <div class="app-sidebar__empty">
                            {icon("message-square")}
                            <Show when=move || !collapsed()>
                                <span>"No chats yet"</span>
                            </Show>
                        </div>
                    }
                >
                    <For
                        each=sessions
                        key=|session| format!("{}:{}", session.id, session.title)
                        let:session
                    >
                        {{
                            let id = session.id;
                            let title = session.title.clone();
                            let tooltip = session.title.clone();
                            let initial = session.initial();
                            view! {
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=move || current_id() == Some(id)
                                    title=tooltip
                                    on:click=move |_| {
                                        ctx.load_session(id);
                                        nav.navigate(&AppRoute::Dashboard);
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        <Show
                                            when=move || !collapsed()
                                            fallback=move || view! {
                                                <span class="app-sidebar__initial">{initial.to_string()}</span>
                                            }
                                        >
                                            {icon("message-square")}
                                            <span class="app-sidebar__title">{title.clone()}</span>
                                        </Show>
                                    </div>
                                    <Show when=move || !collapsed()>
                                        <button
                                            class="icon-button app-sidebar__more"
                                            title="More"
                                            on:click=move |ev: web_sys::MouseEvent| {
                                                ev.stop_propagation();
                                                open_menu.update(|open| {
                                                    *open = if *open == Some(id) { None } else { Some(id) };
                                                });
                                            }
                                        >
                                            {icon("more-horizontal")}
                                        </button>
                                    </Show>
                                    <Show when=move || open_menu.get() == Some(id)>
                                        <ul class="dropdown dropdown--right" role="menu">
                                            {ItemAction::all()
                                                .into_iter()
                                                .map(|action| view! {
                                                    <li>
                                                        <button
                                                            class="dropdown__item"
                                                            class:dropdown__item--danger={action == ItemAction::Delete}
                                                            role="menuitem"
                                                            on:click=move |ev: web_sys::MouseEvent| {
                                                                ev.stop_propagation();
                                                                run_action(id, action);
                                                            }
                                                        >
                                                            {icon(action.icon())}
                                                            <span>{action.label()}</span>
                                                        </button>
                                                    </li>
                                                })
                                                .collect_view()}
                                        </ul>
                                    </Show>
                                </div>
                            }
                        }}
                    </For>
                </Show>
            </div>

            <UserMenu collapsed=Signal::derive(collapsed) />

            <Dialog open=rename_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Rename chat"</DialogTitle>
                        <DialogContent>
                            <Input value=rename_value placeholder="Chat title" />
                        </DialogContent>
                        <DialogActions>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| rename_open.set(false)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || rename_value.with(|v| v.trim().is_empty()))
                                on_click=confirm_rename
                            >
                                "Save"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}
