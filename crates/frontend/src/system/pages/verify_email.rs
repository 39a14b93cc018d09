use contracts::shared::validation::{VerifyEmailForm, VERIFICATION_CODE_LEN};
use contracts::system::auth::{RequestVerificationRequest, ResendCooldown, VERIFY_REDIRECT_MS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use thaw::*;

use crate::shared::icons::icon;
use crate::system::auth::api;
use crate::system::auth::gate::{AppRoute, Navigator, RouterNavigator};

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let query = use_query_map();
    let email = Memo::new(move |_| query.with(|q| q.get("email")).unwrap_or_default());

    let code = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let info = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);
    let is_resending = RwSignal::new(false);
    let verified = RwSignal::new(false);
    let cooldown = RwSignal::new(ResendCooldown::default());

    let nav = RouterNavigator::new();

    // one countdown loop for the page lifetime; stops once the page is gone
    spawn_local(async move {
        loop {
            TimeoutFuture::new(1000).await;
            if cooldown.try_update(|c| c.tick()).is_none() {
                break;
            }
        }
    });

    let code_complete = move || {
        VerifyEmailForm {
            email: String::new(),
            code: code.get(),
        }
        .is_complete()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let form = VerifyEmailForm {
            email: email.get_untracked(),
            code: code.get_untracked(),
        };
        let form = match form.validate() {
            Ok(form) => form,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        error.set(None);
        info.set(None);
        is_loading.set(true);

        spawn_local(async move {
            match api::verify_email(form.email, form.code).await {
                Ok(response) => {
                    log::info!("Email verified: {}", response.text());
                    verified.try_set(true);
                    TimeoutFuture::new(VERIFY_REDIRECT_MS).await;
                    if verified.try_get_untracked() == Some(true) {
                        nav.navigate(&AppRoute::Dashboard);
                    }
                }
                Err(e) => {
                    log::error!("Email verification failed: {e}");
                    error.try_set(Some(e.to_string()));
                }
            }
            is_loading.try_set(false);
        });
    };

    let on_resend = move |_| {
        if !cooldown.get_untracked().can_resend() || is_resending.get_untracked() {
            return;
        }
        is_resending.set(true);
        error.set(None);
        info.set(None);
        let request = RequestVerificationRequest::resend(email.get_untracked());

        spawn_local(async move {
            match api::request_verification(&request).await {
                Ok(_) => {
                    info.try_set(Some("A new code has been sent to your email".to_string()));
                    cooldown.try_update(|c| c.reset());
                }
                Err(e) => {
                    log::error!("Resending the code failed: {e}");
                    error.try_set(Some(e.to_string()));
                }
            }
            is_resending.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <a class="auth-card__brand" href="/">"mYFeel"</a>
                <Show
                    when=move || verified.get()
                    fallback=move || view! {
                        <div class="auth-card__icon">{icon("mail")}</div>
                        <h1 class="auth-card__title">"Check your email"</h1>
                        <p class="auth-card__subtitle">
                            "We sent a " {VERIFICATION_CODE_LEN} "-digit code to "
                            <strong>{move || email.get()}</strong>
                        </p>

                        {move || error.get().map(|message| view! {
                            <MessageBar intent=MessageBarIntent::Error>
                                <span>{message}</span>
                            </MessageBar>
                        })}
                        {move || info.get().map(|message| view! {
                            <MessageBar intent=MessageBarIntent::Success>
                                <span>{message}</span>
                            </MessageBar>
                        })}

                        <form class="auth-card__form" on:submit=on_submit novalidate>
                            <input
                                class="form__input form__input--code"
                                type="text"
                                inputmode="numeric"
                                autocomplete="one-time-code"
                                maxlength=VERIFICATION_CODE_LEN.to_string()
                                placeholder="000000"
                                prop:value=move || code.get()
                                disabled=move || is_loading.get()
                                on:input=move |ev| {
                                    let digits: String = event_target_value(&ev)
                                        .chars()
                                        .filter(|c| c.is_ascii_digit())
                                        .take(VERIFICATION_CODE_LEN)
                                        .collect();
                                    code.set(digits);
                                    error.set(None);
                                }
                            />
                            <button
                                type="submit"
                                class="button button--primary button--block"
                                disabled=move || is_loading.get() || !code_complete()
                            >
                                {move || if is_loading.get() { "Verifying..." } else { "Verify Email" }}
                            </button>
                        </form>

                        <p class="auth-card__footer">
                            "Didn't get the code? "
                            <button
                                type="button"
                                class="button button--link"
                                disabled=move || !cooldown.get().can_resend() || is_resending.get()
                                on:click=on_resend
                            >
                                {move || cooldown.get().label()}
                            </button>
                        </p>
                    }
                >
                    <div class="auth-card__icon auth-card__icon--success">{icon("check-circle")}</div>
                    <h1 class="auth-card__title">"Email verified"</h1>
                    <p class="auth-card__subtitle">"Taking you to your dashboard..."</p>
                </Show>
            </div>
        </div>
    }
}
