use contracts::system::auth::{UserInfo, TOKEN_KEY, USER_KEY};
use web_sys::window;

/// Client-side persistence of the auth session
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn save_token(&self, token: &str);
    fn user(&self) -> Option<UserInfo>;
    fn save_user(&self, user: &UserInfo);
    /// Remove both the token and the cached user
    fn clear(&self);
}

/// `window.localStorage` backed store
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl TokenStore for BrowserTokenStore {
    fn token(&self) -> Option<String> {
        get_local_storage()?
            .get_item(TOKEN_KEY)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn save_token(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn user(&self) -> Option<UserInfo> {
        let raw = get_local_storage()?.get_item(USER_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    fn save_user(&self, user: &UserInfo) {
        let Some(storage) = get_local_storage() else {
            return;
        };
        match serde_json::to_string(user) {
            Ok(raw) => {
                let _ = storage.set_item(USER_KEY, &raw);
            }
            Err(e) => log::error!("Failed to serialize user: {e}"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::cell::RefCell;

    /// In-memory store for tests
    #[derive(Debug, Default)]
    pub struct MemoryTokenStore {
        pub token: RefCell<Option<String>>,
        pub user: RefCell<Option<UserInfo>>,
    }

    impl MemoryTokenStore {
        pub fn with_token(token: &str) -> Self {
            let store = Self::default();
            store.save_token(token);
            store
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn save_token(&self, token: &str) {
            *self.token.borrow_mut() = Some(token.to_string());
        }

        fn user(&self) -> Option<UserInfo> {
            self.user.borrow().clone()
        }

        fn save_user(&self, user: &UserInfo) {
            *self.user.borrow_mut() = Some(user.clone());
        }

        fn clear(&self) {
            self.token.borrow_mut().take();
            self.user.borrow_mut().take();
        }
    }
}
