use contracts::shared::validation::{MessageForm, MESSAGE_MAX_LEN};
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

fn count_class(count: usize) -> &'static str {
    if count > MESSAGE_MAX_LEN {
        "chat-input__count chat-input__count--over"
    } else {
        "chat-input__count"
    }
}

/// Message box with attach and send buttons.
///
/// Content is validated before `on_send` sees it; the box clears after
/// a valid send.
#[component]
pub fn ChatInput(
    on_send: Callback<String>,
    #[prop(optional)]
    on_attach: Option<Callback<()>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Rendered above the input row (attachments, uploader)
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let placeholder_text = move || {
        placeholder
            .get()
            .unwrap_or_else(|| "Ask anything about your documents...".to_string())
    };

    let send = move || {
        if disabled.get_untracked() {
            return;
        }
        match MessageForm::new(text.get_untracked().trim()).validate() {
            Ok(form) => {
                error.set(None);
                text.set(String::new());
                on_send.run(form.content);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    Effect::new(move |prev: Option<()>| {
        text.track();
        if prev.is_some() {
            error.set(None);
        }
    });

    let count = move || text.with(|t| t.chars().count());

    view! {
        <div class="chat-input">
            {children.map(|c| c())}
            <div class="chat-input__row">
                {on_attach.map(|attach| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=disabled
                        on_click=move |_| attach.run(())
                        attr:title="Attach file"
                    >
                        {icon("paperclip")}
                    </Button>
                })}
                <div class="chat-input__field">
                    <Textarea
                        value=text
                        placeholder=placeholder_text()
                        attr:style="width: 100%; min-height: 48px; max-height: 200px; resize: vertical;"
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" && !ev.shift_key() {
                                ev.prevent_default();
                                send();
                            }
                        }
                    />
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || disabled.get() || text.with(|t| t.trim().is_empty()))
                    on_click=move |_| send()
                    attr:title="Send"
                >
                    {icon("send")}
                </Button>
            </div>
            <div class="chat-input__meta">
                <span class="form__error">{move || error.get()}</span>
                <span class=move || count_class(count())>
                    {move || format!("{}/{}", count(), MESSAGE_MAX_LEN)}
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_class_flags_overflow() {
        assert_eq!(count_class(0), "chat-input__count");
        assert_eq!(count_class(MESSAGE_MAX_LEN), "chat-input__count");
        assert_eq!(
            count_class(MESSAGE_MAX_LEN + 1),
            "chat-input__count chat-input__count--over"
        );
    }
}
