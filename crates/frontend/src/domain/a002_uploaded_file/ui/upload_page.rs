use contracts::domain::a002_uploaded_file::tracker::UploadTracker;
use contracts::domain::a002_uploaded_file::FileMeta;
use leptos::prelude::*;
use thaw::*;

use super::file_list::UploadedFileList;
use super::file_upload::{FileDropzone, RejectionList};
use super::simulation::run_upload;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::task_registry::spawn_owned;

const TAB_FILES: &str = "files";
const TAB_URL: &str = "url";

/// Standalone upload page: dropzone and "From URL" share one tracker
#[component]
pub fn UploadPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tasks = ctx.tasks;

    let tracker = RwSignal::new(UploadTracker::dropzone());
    let rejections = RwSignal::new(Vec::<String>::new());
    let selected_tab = RwSignal::new(TAB_FILES.to_string());
    let url = RwSignal::new(String::new());

    let start_simulation = move |file_id: String| {
        spawn_owned(tasks, file_id.clone(), move |handle| {
            run_upload(
                file_id,
                handle,
                move |id, inc| tracker.try_update(|t| t.advance(id, inc)).flatten(),
                move |id| tracker.try_update(|t| t.finish_processing(id)).flatten(),
            )
        });
    };

    let on_files = Callback::new(move |candidates: Vec<FileMeta>| {
        let Some(report) = tracker.try_update(|t| t.admit(candidates)) else {
            return;
        };
        for rejected in &report.rejected {
            log::warn!("File rejected: {rejected}");
        }
        rejections.set(report.error_messages());
        for file_id in report.admitted {
            log::info!("File {file_id} admitted");
            start_simulation(file_id);
        }
    });

    let add_url = move |_| {
        let value = url.get_untracked();
        if value.trim().is_empty() {
            rejections.set(vec!["Enter a URL to add".to_string()]);
            return;
        }
        match tracker.try_update(|t| t.admit_web_content(&value)) {
            Some(Ok(file_id)) => {
                log::info!("Web content {file_id} admitted");
                rejections.set(Vec::new());
                url.set(String::new());
                start_simulation(file_id);
            }
            Some(Err(rejected)) => {
                log::warn!("Web content rejected: {rejected}");
                rejections.set(vec![rejected.to_string()]);
            }
            None => {}
        }
    };

    let on_remove = Callback::new(move |file_id: String| {
        tasks.update_value(|t| {
            t.cancel(&file_id);
        });
        tracker.update(|t| {
            t.remove(&file_id);
        });
    });

    on_cleanup(move || {
        let ids: Vec<String> = tracker
            .try_with_untracked(|t| t.files().iter().map(|f| f.id.clone()).collect())
            .unwrap_or_default();
        tasks.try_update_value(|t| {
            for id in &ids {
                t.cancel(id);
            }
        });
    });

    let files = Signal::derive(move || tracker.with(|t| t.files().to_vec()));
    let is_full = Signal::derive(move || tracker.with(|t| t.remaining_capacity() == 0));

    view! {
        <div class="page upload-page">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <div>
                    <h1 class="page__title">"Upload documents"</h1>
                    <p class="page__subtitle">"Add study material to turn into notes, questions and references"</p>
                </div>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || tracker.with(|t| format!("{} / {} files", t.len(), t.max_files()))}
                </Badge>
            </Flex>

            <TabList selected_value=selected_tab>
                <Tab value=TAB_FILES>"Files"</Tab>
                <Tab value=TAB_URL>"From URL"</Tab>
            </TabList>

            <div class="upload-page__panel">
                <Show
                    when=move || selected_tab.get() == TAB_URL
                    fallback=move || view! {
                        <FileDropzone
                            input_id="upload-page-file-input"
                            on_files=on_files
                            multiple=true
                            disabled=is_full
                        />
                    }
                >
                    <div class="url-form">
                        <Input
                            value=url
                            input_type=InputType::Url
                            placeholder="https://example.com/article"
                            disabled=is_full
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=is_full
                            on_click=add_url
                        >
                            "Add URL"
                        </Button>
                    </div>
                </Show>

                <RejectionList errors=rejections />
            </div>

            <Show when=move || !files.with(Vec::is_empty)>
                <h2 class="page__section-title">"Uploaded files"</h2>
                <UploadedFileList files=files on_remove=on_remove />
            </Show>
        </div>
    }
}
