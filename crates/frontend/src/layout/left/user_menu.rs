use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::gate::{self, RouterNavigator};

/// Avatar with name and the Profile / Settings / Help / Sign out menu
#[component]
pub fn UserMenu(#[prop(into)] collapsed: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let nav = RouterNavigator::new();
    let menu_open = RwSignal::new(false);

    let initial = move || auth.profile().map(|p| p.initial()).unwrap_or('U').to_string();
    let name = move || {
        auth.profile()
            .map(|p| p.display_name())
            .unwrap_or_else(|| "User".to_string())
    };
    let email = move || auth.profile().map(|p| p.email).unwrap_or_default();

    let log_only = move |item: &'static str| {
        menu_open.set(false);
        log::info!("{item} opened");
    };

    let sign_out = move |_| {
        menu_open.set(false);
        ctx.reset();
        let state = gate::sign_out(&auth.store, &nav);
        auth.state.set(state);
        log::info!("Signed out");
    };

    view! {
        <div class="user-menu">
            <Show when=move || menu_open.get()>
                <ul class="dropdown dropdown--up" role="menu">
                    <li>
                        <button class="dropdown__item" role="menuitem" on:click=move |_| log_only("Profile")>
                            {icon("user")}
                            <span>"Profile"</span>
                        </button>
                    </li>
                    <li>
                        <button class="dropdown__item" role="menuitem" on:click=move |_| log_only("Settings")>
                            {icon("settings")}
                            <span>"Settings"</span>
                        </button>
                    </li>
                    <li>
                        <button class="dropdown__item" role="menuitem" on:click=move |_| log_only("Help & Support")>
                            {icon("help-circle")}
                            <span>"Help & Support"</span>
                        </button>
                    </li>
                    <li>
                        <button class="dropdown__item dropdown__item--danger" role="menuitem" on:click=sign_out>
                            {icon("log-out")}
                            <span>"Sign out"</span>
                        </button>
                    </li>
                </ul>
            </Show>
            <button
                class="user-menu__trigger"
                title=name
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                <span class="user-menu__avatar">{initial}</span>
                <Show when=move || !collapsed.get()>
                    <span class="user-menu__identity">
                        <span class="user-menu__name">{name}</span>
                        <span class="user-menu__email">{email}</span>
                    </span>
                </Show>
            </button>
        </div>
    }
}
