use contracts::domain::a002_uploaded_file::aggregate::format_file_size;
use contracts::domain::a002_uploaded_file::{UploadStatus, UploadedFile};
use leptos::prelude::*;

use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;

/// Tracked files with progress bar, status badge and remove button
#[component]
pub fn UploadedFileList(
    #[prop(into)] files: Signal<Vec<UploadedFile>>,
    on_remove: Callback<String>,
    #[prop(optional)]
    compact: bool,
) -> impl IntoView {
    view! {
        <ul class="file-list" class:file-list--compact=compact>
            <For
                each=move || files.get()
                key=|f| f.id.clone()
                let:file
            >
                {{
                    let id = file.id.clone();
                    let status_id = id.clone();
                    let progress_id = id.clone();
                    let status = Signal::derive(move || {
                        files.with(|fs| {
                            fs.iter()
                                .find(|f| f.id == status_id)
                                .map(|f| f.status)
                                .unwrap_or(UploadStatus::Error)
                        })
                    });
                    let progress = Signal::derive(move || {
                        files.with(|fs| {
                            fs.iter()
                                .find(|f| f.id == progress_id)
                                .map(|f| f.progress_percent())
                                .unwrap_or(0)
                        })
                    });
                    let size = if file.file.size > 0 {
                        format_file_size(file.file.size)
                    } else {
                        String::new()
                    };
                    view! {
                        <li class="file-list__item">
                            <span class="file-list__kind">{file.kind_label()}</span>
                            <div class="file-list__body">
                                <div class="file-list__row">
                                    <span class="file-list__name" title=file.file.name.clone()>
                                        {file.file.name.clone()}
                                    </span>
                                    <StatusBadge status=status />
                                </div>
                                <div class="file-list__row file-list__row--meta">
                                    <span>{size}</span>
                                    <Show when=move || status.get() == UploadStatus::Uploading>
                                        <span>{move || format!("{}%", progress.get())}</span>
                                    </Show>
                                </div>
                                <Show when=move || status.get() == UploadStatus::Uploading>
                                    <div class="progress">
                                        <div
                                            class="progress__bar"
                                            style=move || format!("width: {}%;", progress.get())
                                        ></div>
                                    </div>
                                </Show>
                                {file.error.clone().map(|e| view! { <p class="form__error">{e}</p> })}
                            </div>
                            <button
                                class="icon-button"
                                title="Remove file"
                                on:click=move |_| on_remove.run(id.clone())
                            >
                                {icon("close")}
                            </button>
                        </li>
                    }
                }}
            </For>
        </ul>
    }
}
