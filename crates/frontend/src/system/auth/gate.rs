//! Auth gate: what happens to the stored session on dashboard load,
//! sign-in and sign-out, independent of the browser.

use contracts::system::auth::{LoginResponse, ProfileName, UserProfile, VerifyEmailQuery};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use std::rc::Rc;

use super::context::AuthState;
use super::storage::TokenStore;
use crate::shared::api_utils::ApiError;

/// Application routes reachable from auth flows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Landing,
    SignIn,
    SignUp,
    VerifyEmail { email: String },
    Dashboard,
    Upload,
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            AppRoute::Landing => "/".to_string(),
            AppRoute::SignIn => "/auth/signin".to_string(),
            AppRoute::SignUp => "/auth/signup".to_string(),
            AppRoute::VerifyEmail { email } => {
                let query = VerifyEmailQuery {
                    email: email.clone(),
                };
                match serde_qs::to_string(&query) {
                    Ok(qs) => format!("/auth/verify-email?{qs}"),
                    Err(e) => {
                        log::error!("Failed to encode verify-email query: {e}");
                        "/auth/verify-email".to_string()
                    }
                }
            }
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::Upload => "/dashboard/upload".to_string(),
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: &AppRoute);
}

/// Navigator over the `leptos_router` navigate function
#[derive(Clone, Copy)]
pub struct RouterNavigator {
    nav: StoredValue<Rc<dyn Fn(&str)>, LocalStorage>,
}

impl RouterNavigator {
    /// Must be called inside `<Router>`
    pub fn new() -> Self {
        let navigate = leptos_router::hooks::use_navigate();
        let nav: Rc<dyn Fn(&str)> = Rc::new(move |path: &str| {
            navigate(path, NavigateOptions::default());
        });
        Self {
            nav: StoredValue::new_local(nav),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, route: &AppRoute) {
        if let Some(nav) = self.nav.try_get_value() {
            nav(&route.path());
        }
    }
}

/// First step of the dashboard check.
///
/// Without a stored token this redirects to sign-in and returns `None`;
/// otherwise returns the token to validate.
pub fn start<S: TokenStore, N: Navigator>(store: &S, nav: &N) -> Option<String> {
    match store.token() {
        Some(token) => Some(token),
        None => {
            log::info!("No access token, redirecting to sign-in");
            nav.navigate(&AppRoute::SignIn);
            None
        }
    }
}

/// Apply the profile response for `token`.
///
/// Any failure clears the stored session and redirects to sign-in once.
pub fn finish<S: TokenStore, N: Navigator>(
    store: &S,
    nav: &N,
    token: String,
    result: Result<UserProfile, ApiError>,
) -> AuthState {
    match result {
        Ok(profile) => AuthState::authenticated(token, ProfileName::from_profile(&profile)),
        Err(e) => {
            log::warn!("Profile check failed: {e}");
            store.clear();
            nav.navigate(&AppRoute::SignIn);
            AuthState::cleared()
        }
    }
}

/// Persist a successful login and go to the dashboard
pub fn complete_sign_in<S: TokenStore, N: Navigator>(
    store: &S,
    nav: &N,
    response: LoginResponse,
) -> AuthState {
    store.save_token(&response.access_token);
    store.save_user(&response.user);
    let profile = ProfileName::from_user(&response.user);
    nav.navigate(&AppRoute::Dashboard);
    AuthState::authenticated(response.access_token, profile)
}

pub fn sign_out<S: TokenStore, N: Navigator>(store: &S, nav: &N) -> AuthState {
    store.clear();
    nav.navigate(&AppRoute::SignIn);
    AuthState::cleared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::context::AuthPhase;
    use crate::system::auth::storage::memory::MemoryTokenStore;
    use contracts::system::auth::UserInfo;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &AppRoute) {
            self.visited.borrow_mut().push(route.path());
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: Some(1),
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            is_verified: true,
        }
    }

    #[test]
    fn test_no_token_redirects_to_sign_in() {
        let store = MemoryTokenStore::default();
        let nav = RecordingNavigator::default();

        assert_eq!(start(&store, &nav), None);
        assert_eq!(*nav.visited.borrow(), vec!["/auth/signin".to_string()]);
    }

    #[test]
    fn test_unauthorized_profile_clears_token_once() {
        let store = MemoryTokenStore::with_token("stale");
        let nav = RecordingNavigator::default();

        let token = start(&store, &nav).unwrap();
        let err = ApiError::from_body(401, None, "Failed to load profile");
        let state = finish(&store, &nav, token, Err(err));

        assert_eq!(state.phase, AuthPhase::Cleared);
        assert!(store.token().is_none());
        assert_eq!(*nav.visited.borrow(), vec!["/auth/signin".to_string()]);
    }

    #[test]
    fn test_network_failure_also_clears() {
        let store = MemoryTokenStore::with_token("t");
        let nav = RecordingNavigator::default();
        let state = finish(
            &store,
            &nav,
            "t".into(),
            Err(ApiError::Network("offline".into())),
        );
        assert!(!state.is_authenticated());
        assert!(store.token().is_none());
        assert_eq!(nav.visited.borrow().len(), 1);
    }

    #[test]
    fn test_profile_populates_state() {
        let store = MemoryTokenStore::with_token("good");
        let nav = RecordingNavigator::default();
        let state = finish(&store, &nav, "good".into(), Ok(profile()));

        assert!(state.is_authenticated());
        let name = state.profile.unwrap();
        assert_eq!(name.first_name, "Ada");
        assert_eq!(name.initial(), 'A');
        assert!(nav.visited.borrow().is_empty());
        assert_eq!(store.token().as_deref(), Some("good"));
    }

    #[test]
    fn test_sign_in_persists_and_navigates() {
        let store = MemoryTokenStore::default();
        let nav = RecordingNavigator::default();
        let response = LoginResponse {
            access_token: "fresh".into(),
            user: UserInfo {
                id: Some(3),
                email: "g@navy.mil".into(),
                full_name: "Grace Hopper".into(),
            },
        };

        let state = complete_sign_in(&store, &nav, response);
        assert!(state.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("fresh"));
        assert_eq!(store.user().unwrap().full_name, "Grace Hopper");
        assert_eq!(*nav.visited.borrow(), vec!["/dashboard".to_string()]);

        let state = sign_out(&store, &nav);
        assert_eq!(state.phase, AuthPhase::Cleared);
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_verify_email_route_encodes_email() {
        let route = AppRoute::VerifyEmail {
            email: "a+b@example.com".into(),
        };
        let path = route.path();
        let qs = path.strip_prefix("/auth/verify-email?").unwrap();
        assert!(!qs.contains('+'));
        let query: VerifyEmailQuery = serde_qs::from_str(qs).unwrap();
        assert_eq!(query.email, "a+b@example.com");
        assert_eq!(AppRoute::Upload.path(), "/dashboard/upload");
    }
}
