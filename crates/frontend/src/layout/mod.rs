pub mod center;
pub mod global_context;
pub mod left;

use leptos::prelude::*;

/// Dashboard shell.
///
/// ```text
/// +-----------+------------------------+
/// |  Sidebar  |        Content         |
/// |  (Left)   |        (Center)        |
/// +-----------+------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="app-body">
                <left::Left>
                    <left::ChatSidebar />
                </left::Left>
                <div class="app-main">
                    <center::Center>
                        {children()}
                    </center::Center>
                </div>
            </div>
        </div>
    }
}
