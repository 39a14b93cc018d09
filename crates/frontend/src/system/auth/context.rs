use contracts::system::auth::ProfileName;
use leptos::prelude::*;

use super::storage::{BrowserTokenStore, TokenStore};

/// Lifecycle of the client-held session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Token not yet checked against the profile endpoint
    #[default]
    Initializing,
    Authenticated,
    /// Signed out, or the token was rejected
    Cleared,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub profile: Option<ProfileName>,
    pub phase: AuthPhase,
}

impl AuthState {
    pub fn authenticated(token: String, profile: ProfileName) -> Self {
        Self {
            token: Some(token),
            profile: Some(profile),
            phase: AuthPhase::Authenticated,
        }
    }

    pub fn cleared() -> Self {
        Self {
            token: None,
            profile: None,
            phase: AuthPhase::Cleared,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.token.is_some()
    }
}

/// Auth session shared through the component tree
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    pub store: BrowserTokenStore,
}

impl AuthContext {
    pub fn new() -> Self {
        let store = BrowserTokenStore;
        // a cached user gives the sidebar a name before the profile call returns
        let profile = store.user().map(|u| ProfileName::from_user(&u));
        Self {
            state: RwSignal::new(AuthState {
                token: store.token(),
                profile,
                phase: AuthPhase::Initializing,
            }),
            store,
        }
    }

    pub fn profile(&self) -> Option<ProfileName> {
        self.state.with(|s| s.profile.clone())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_context(AuthContext::new());
    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
