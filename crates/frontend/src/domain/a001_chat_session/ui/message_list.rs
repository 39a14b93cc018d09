use contracts::domain::a001_chat_session::{ChatMessage, ResponsePayload};
use leptos::prelude::*;

use crate::shared::date_utils::format_local_time;
use crate::shared::icons::icon;

fn render_payload(payload: ResponsePayload) -> AnyView {
    match payload {
        ResponsePayload::ShortNote { notes } => view! {
            <ul class="payload payload--notes">
                {notes.into_iter().map(|note| view! { <li>{note}</li> }).collect_view()}
            </ul>
        }
        .into_any(),
        ResponsePayload::Question { items } => view! {
            <div class="payload payload--questions">
                {items
                    .into_iter()
                    .map(|item| view! {
                        <div class="payload__question">
                            <div class="payload__question-label">
                                {icon(item.kind.icon())}
                                <strong>{item.label}</strong>
                            </div>
                            <p>{item.example}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        ResponsePayload::Reference { refs } => view! {
            <div class="payload payload--refs">
                {refs
                    .into_iter()
                    .map(|link| view! {
                        <div class="payload__ref">
                            {icon("link")}
                            <div>
                                <strong>{link.title}</strong>
                                <p>{link.description}</p>
                            </div>
                        </div>
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.is_user();
    let time = format_local_time(&message.created_at);

    view! {
        <div class="message" class:message--user=is_user class:message--assistant=!is_user>
            <div class="message__avatar">
                {if is_user { icon("user") } else { icon("bot") }}
            </div>
            <div class="message__bubble" class:message__bubble--failed=message.failed>
                <div class="message__content">{message.content}</div>
                {message.payload.map(render_payload)}
                <div class="message__time">{time}</div>
            </div>
        </div>
    }
}

/// Ordered conversation with a "thinking" indicator while a reply is pending
#[component]
pub fn MessageList(
    #[prop(into)] messages: Signal<Vec<ChatMessage>>,
    #[prop(into)] thinking: Signal<bool>,
) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();

    // keep the newest message in view
    Effect::new(move |_| {
        messages.track();
        thinking.track();
        if let Some(el) = container.get() {
            request_animation_frame(move || {
                el.set_scroll_top(el.scroll_height());
            });
        }
    });

    view! {
        <div class="message-list" node_ref=container>
            <For
                each=move || messages.get()
                key=|msg| msg.id.to_string()
                let:msg
            >
                <MessageBubble message=msg />
            </For>
            <Show when=move || thinking.get()>
                <div class="message message--assistant">
                    <div class="message__avatar">{icon("bot")}</div>
                    <div class="message__bubble message__bubble--thinking">
                        <span class="thinking-dot"></span>
                        <span class="thinking-dot"></span>
                        <span class="thinking-dot"></span>
                    </div>
                </div>
            </Show>
        </div>
    }
}
