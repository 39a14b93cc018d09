use contracts::shared::validation::{fields, SignUpForm};
use contracts::system::auth::RequestVerificationRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::ui::{Checkbox, Input};
use crate::shared::state::FormErrors;
use crate::system::auth::api;
use crate::system::auth::gate::{AppRoute, Navigator, RouterNavigator};

#[component]
pub fn SignUpPage() -> impl IntoView {
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let agree_to_terms = RwSignal::new(false);
    let is_loading = RwSignal::new(false);
    let errors = FormErrors::new();

    errors.clear_on_edit(full_name, fields::FULL_NAME);
    errors.clear_on_edit(email, fields::EMAIL);
    errors.clear_on_edit(password, fields::PASSWORD);
    errors.clear_on_edit(confirm_password, fields::CONFIRM_PASSWORD);
    errors.clear_on_edit(agree_to_terms, fields::AGREE_TO_TERMS);

    let nav = RouterNavigator::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let form = SignUpForm {
            full_name: full_name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            agree_to_terms: agree_to_terms.get_untracked(),
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
            let request = RequestVerificationRequest {
                full_name: form.full_name,
                email: form.email.clone(),
                password: form.password,
            };
            match api::request_verification(&request).await {
                Ok(response) => {
                    log::info!("Verification requested: {}", response.text());
                    nav.navigate(&AppRoute::VerifyEmail { email: form.email });
                }
                Err(e) => {
                    log::error!("Sign-up failed: {e}");
                    errors.set(e.into_field_errors(fields::EMAIL));
                }
            }
            is_loading.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <a class="auth-card__brand" href="/">"mYFeel"</a>
                <h1 class="auth-card__title">"Create your account"</h1>
                <p class="auth-card__subtitle">"Turn your documents into notes, questions and references"</p>

                <form class="auth-card__form" on:submit=on_submit novalidate>
                    <Input
                        label="Full name"
                        id="signup-full-name"
                        placeholder="Ada Lovelace"
                        autocomplete="name"
                        value=full_name
                        disabled=is_loading
                        error=errors.field(fields::FULL_NAME)
                    />
                    <Input
                        label="Email"
                        id="signup-email"
                        input_type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        value=email
                        disabled=is_loading
                        error=errors.field(fields::EMAIL)
                    />
                    <Input
                        label="Password"
                        id="signup-password"
                        input_type="password"
                        placeholder="At least 8 characters"
                        autocomplete="new-password"
                        value=password
                        disabled=is_loading
                        error=errors.field(fields::PASSWORD)
                    />
                    <Input
                        label="Confirm password"
                        id="signup-confirm-password"
                        input_type="password"
                        autocomplete="new-password"
                        value=confirm_password
                        disabled=is_loading
                        error=errors.field(fields::CONFIRM_PASSWORD)
                    />
                    <Checkbox
                        id="signup-terms"
                        checked=agree_to_terms
                        disabled=is_loading
                        error=errors.field(fields::AGREE_TO_TERMS)
                    >
                        "I agree to the "
                        <a href="#">"Terms of Service"</a>
                        " and "
                        <a href="#">"Privacy Policy"</a>
                    </Checkbox>

                    <button
                        type="submit"
                        class="button button--primary button--block"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>

                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href="/auth/signin">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
