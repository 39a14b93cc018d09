use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Sidebar zone: 320px expanded, 80px collapsed
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let is_open = move || ctx.left_open.get();

    view! {
        <aside
            data-zone="left"
            class="left"
            class:left--collapsed=move || !is_open()
            style:width=move || if is_open() { "320px" } else { "80px" }
        >
            {children()}
        </aside>
    }
}
