use crate::domain::a001_chat_session::ui::ChatDashboard;
use crate::domain::a002_uploaded_file::ui::UploadPage;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::landing::LandingPage;
use crate::system::pages::signin::SignInPage;
use crate::system::pages::signup::SignUpPage;
use crate::system::pages::verify_email::VerifyEmailPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page-center">
            <h1>"Page not found"</h1>
            <a href="/">"Back to home"</a>
        </div>
    }
}

#[component]
fn DashboardRoute() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <ChatDashboard />
            </Shell>
        </RequireAuth>
    }
}

#[component]
fn UploadRoute() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <UploadPage />
            </Shell>
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=LandingPage />
                <Route path=path!("/auth/signin") view=SignInPage />
                <Route path=path!("/auth/signup") view=SignUpPage />
                <Route path=path!("/auth/verify-email") view=VerifyEmailPage />
                <Route path=path!("/dashboard") view=DashboardRoute />
                <Route path=path!("/dashboard/upload") view=UploadRoute />
            </Routes>
        </Router>
    }
}
