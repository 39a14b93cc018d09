use contracts::shared::validation::{fields, SignInForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::ui::Input;
use crate::shared::state::FormErrors;
use crate::system::auth::api;
use crate::system::auth::context::use_auth;
use crate::system::auth::gate::{self, RouterNavigator};

#[component]
pub fn SignInPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let errors = FormErrors::new();

    errors.clear_on_edit(email, fields::EMAIL);
    errors.clear_on_edit(password, fields::PASSWORD);

    let auth = use_auth();
    let nav = RouterNavigator::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let form = SignInForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let form = match form.validate() {
            Ok(form) => form,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        errors.reset();
        is_loading.set(true);

        spawn_local(async move {
            match api::login(form.email, form.password).await {
                Ok(response) => {
                    log::info!("Signed in as {}", response.user.email);
                    let state = gate::complete_sign_in(&auth.store, &nav, response);
                    auth.state.set(state);
                }
                Err(e) => {
                    log::error!("Sign-in failed: {e}");
                    errors.set(e.into_field_errors(fields::PASSWORD));
                }
            }
            is_loading.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <a class="auth-card__brand" href="/">"mYFeel"</a>
                <h1 class="auth-card__title">"Welcome back"</h1>
                <p class="auth-card__subtitle">"Sign in to continue studying your documents"</p>

                <form class="auth-card__form" on:submit=on_submit novalidate>
                    <Input
                        label="Email"
                        id="signin-email"
                        input_type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        value=email
                        disabled=is_loading
                        error=errors.field(fields::EMAIL)
                    />
                    <Input
                        label="Password"
                        id="signin-password"
                        input_type="password"
                        placeholder="Your password"
                        autocomplete="current-password"
                        value=password
                        disabled=is_loading
                        error=errors.field(fields::PASSWORD)
                    />

                    <button
                        type="submit"
                        class="button button--primary button--block"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class="auth-card__footer">
                    "Don't have an account? "
                    <a href="/auth/signup">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
