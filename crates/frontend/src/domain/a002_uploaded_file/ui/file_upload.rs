use contracts::domain::a002_uploaded_file::aggregate::{format_file_size, MAX_FILE_SIZE};
use contracts::domain::a002_uploaded_file::FileMeta;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::simulation::file_metas;
use crate::shared::icons::icon;

/// Extensions offered by the browser file picker
pub const ACCEPT_ATTR: &str = ".pdf,.doc,.docx,.txt,.png,.jpg,.jpeg";

/// Drag-and-drop area with a hidden file input behind it
#[component]
pub fn FileDropzone(
    /// Element id of the hidden input, unique per page
    input_id: &'static str,
    on_files: Callback<Vec<FileMeta>>,
    #[prop(optional)]
    multiple: bool,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    let is_dragging = RwSignal::new(false);

    let open_picker = move || {
        if disabled.get_untracked() {
            return;
        }
        let input = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(input_id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(input) = input {
            input.click();
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        is_dragging.set(false);
        if disabled.get_untracked() {
            return;
        }
        let files = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(|list| file_metas(&list))
            .unwrap_or_default();
        if !files.is_empty() {
            on_files.run(files);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let files = input.files().map(|list| file_metas(&list)).unwrap_or_default();
        // allow picking the same file again
        input.set_value("");
        if !files.is_empty() {
            on_files.run(files);
        }
    };

    view! {
        <input
            type="file"
            id=input_id
            accept=ACCEPT_ATTR
            multiple=multiple
            style="display: none;"
            on:change=on_change
        />
        <div
            class="dropzone"
            class:dropzone--compact=compact
            class:dropzone--active=move || is_dragging.get()
            class:dropzone--disabled=move || disabled.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                is_dragging.set(true);
            }
            on:dragleave=move |_| is_dragging.set(false)
            on:drop=on_drop
            on:click=move |_| open_picker()
        >
            <div class="dropzone__icon">{icon("upload")}</div>
            <p class="dropzone__title">
                {move || if is_dragging.get() { "Drop files here" } else { "Drag & drop files or click to browse" }}
            </p>
            <p class="dropzone__hint">
                "PDF, DOC, DOCX, TXT, PNG, JPG up to " {format_file_size(MAX_FILE_SIZE)}
            </p>
        </div>
    }
}

/// Inline list of files kept out of the tracked set
#[component]
pub fn RejectionList(#[prop(into)] errors: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || !errors.with(Vec::is_empty)>
            <ul class="dropzone__rejections">
                {move || {
                    errors
                        .get()
                        .into_iter()
                        .map(|message| view! {
                            <li class="dropzone__rejection">
                                {icon("alert-circle")}
                                <span>{message}</span>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </Show>
    }
}
