use contracts::enums::StudyTab;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_chat_session::ui::{ChatInput, StudyTabs};
use crate::shared::icons::icon;
use crate::system::auth::gate::{AppRoute, Navigator, RouterNavigator};

/// Public landing page. Any attempt to chat or attach asks for an account.
#[component]
pub fn LandingPage() -> impl IntoView {
    let nav = RouterNavigator::new();
    let auth_required = RwSignal::new(false);
    let active_tab = RwSignal::new(StudyTab::default());

    let on_send = Callback::new(move |_: String| auth_required.set(true));
    let on_attach = Callback::new(move |_: ()| auth_required.set(true));
    let on_select = Callback::new(move |tab: StudyTab| active_tab.set(tab));

    view! {
        <div class="landing">
            <header class="landing__header">
                <span class="landing__brand">"mYFeel"</span>
                <nav class="landing__nav">
                    <a class="button button--link" href="/auth/signin">"Sign in"</a>
                    <a class="button button--primary" href="/auth/signup">"Get started"</a>
                </nav>
            </header>

            <main class="landing__main">
                <h1 class="landing__title">"Study smarter with your own documents"</h1>
                <p class="landing__subtitle">
                    "Upload notes, papers or slides and get short notes, practice questions and reference links."
                </p>

                <div class="landing__chat">
                    <StudyTabs active=active_tab on_select=on_select />
                    <ChatInput on_send=on_send on_attach=on_attach />
                </div>

                <div class="landing__features">
                    <div class="landing__feature">
                        {icon("file-text")}
                        <h3>"Short notes"</h3>
                        <p>"Key ideas and definitions pulled from your material."</p>
                    </div>
                    <div class="landing__feature">
                        {icon("message-square")}
                        <h3>"Questions"</h3>
                        <p>"True/false, short answer, multiple choice and fill the blank."</p>
                    </div>
                    <div class="landing__feature">
                        {icon("link")}
                        <h3>"References"</h3>
                        <p>"Related reading to go deeper on any topic."</p>
                    </div>
                </div>
            </main>

            <Dialog open=auth_required>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Authentication required"</DialogTitle>
                        <DialogContent>
                            "Sign in or create a free account to chat with your documents."
                        </DialogContent>
                        <DialogActions>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| {
                                    auth_required.set(false);
                                    nav.navigate(&AppRoute::SignIn);
                                }
                            >
                                "Sign In"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| {
                                    auth_required.set(false);
                                    nav.navigate(&AppRoute::SignUp);
                                }
                            >
                                "Sign Up"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}
