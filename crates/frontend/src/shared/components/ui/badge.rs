use contracts::domain::a002_uploaded_file::UploadStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: Signal<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_str() {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

fn status_variant(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Uploading => "primary",
        UploadStatus::Processing => "warning",
        UploadStatus::Completed => "success",
        UploadStatus::Error => "error",
    }
}

/// Badge for the lifecycle state of an upload
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<UploadStatus>) -> impl IntoView {
    view! {
        <Badge variant=Signal::derive(move || status_variant(status.get()).to_string())>
            {move || status.get().display_name()}
        </Badge>
    }
}
