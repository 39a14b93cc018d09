use leptos::prelude::*;

/// Checkbox with a label slot and an inline field error
#[component]
pub fn Checkbox(
    checked: RwSignal<bool>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// ID for the checkbox element
    #[prop(optional, into)]
    id: MaybeProp<String>,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    /// Label content (may contain links)
    children: Children,
) -> impl IntoView {
    let checkbox_id = move || id.get().unwrap_or_default();

    view! {
        <div class="form__checkbox-wrapper" class:form__checkbox-wrapper--disabled=move || disabled.get()>
            <input
                id=checkbox_id
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                disabled=move || disabled.get()
                on:change=move |ev| {
                    let value = event_target_checked(&ev);
                    checked.set(value);
                    if let Some(handler) = on_change {
                        handler.run(value);
                    }
                }
            />
            <label class="form__checkbox-label" for=checkbox_id>
                {children()}
            </label>
        </div>
        {move || error.get().map(|e| view! { <p class="form__error">{e}</p> })}
    }
}
