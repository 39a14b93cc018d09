use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::context::{use_auth, AuthPhase};
use super::gate::{self, RouterNavigator};

/// Component that requires authentication.
///
/// Checks the stored token against the profile endpoint on mount and
/// redirects to sign-in when it is missing or rejected.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let nav = RouterNavigator::new();

    Effect::new(move |prev: Option<()>| {
        if prev.is_some() {
            return;
        }
        let Some(token) = gate::start(&auth.store, &nav) else {
            auth.state.set(super::context::AuthState::cleared());
            return;
        };
        spawn_local(async move {
            let result = api::fetch_profile(&token).await;
            let state = gate::finish(&auth.store, &nav, token, result);
            auth.state.try_set(state);
        });
    });

    let phase = move || auth.state.with(|s| s.phase);

    view! {
        <Show
            when=move || phase() == AuthPhase::Authenticated
            fallback=move || {
                view! {
                    <div class="page-center">
                        <Show when=move || phase() == AuthPhase::Initializing>
                            <Spinner label="Loading..." />
                        </Show>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
