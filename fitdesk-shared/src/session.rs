//! The session gate: who is signed in, and where that is remembered
//!
//! A session is created by a successful admin login, read on every request and destroyed on
//! logout or when the backend rejects its token. There is no client-side expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The only role allowed into the console
pub const ADMIN_ROLE: &str = "Admin";

/// keys used in the persistent store
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";
pub const NAME_KEY: &str = "userName";
pub const EMAIL_KEY: &str = "userEmail";
/// Older console versions stored the whole user object here
const LEGACY_USER_KEY: &str = "user";

/// Every key that belongs to a session
pub const SESSION_KEYS: &[&str] = &[TOKEN_KEY, ROLE_KEY, NAME_KEY, EMAIL_KEY, LEGACY_USER_KEY];

/// Key-value storage that outlives a page load
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// A store that forgets everything when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// A signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(Session),
}
impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(s) => Some(s),
            Self::Unauthenticated => None,
        }
    }
}

/// Body of the login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginUser {
    pub role: String,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// What the backend answers to a successful login
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginReply {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The credentials were fine, but the account is not an administrator
    #[error("Access denied. Only administrators can login.")]
    AccessDenied,
    #[error("Login failed. Please check your credentials.")]
    Failed(#[source] crate::api::ApiError),
}

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct SessionInner {
    store: Box<dyn SessionStore>,
    state: RwLock<AuthState>,
    listeners: RwLock<Vec<Listener>>,
}

/// Shared handle to the current session
///
/// Clones refer to the same session. Every transition is written through to the store and
/// announced to subscribers.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}
impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.state())
            .finish()
    }
}
impl SessionContext {
    /// Restore the session remembered in `store`
    ///
    /// A remembered token whose role is not [`ADMIN_ROLE`] is removed.
    pub fn load(store: impl SessionStore + 'static) -> Self {
        let state = match (store.get(TOKEN_KEY), store.get(ROLE_KEY)) {
            (Some(token), Some(role)) if !token.is_empty() && role == ADMIN_ROLE => {
                AuthState::Authenticated(Session {
                    token,
                    role,
                    name: store.get(NAME_KEY),
                    email: store.get(EMAIL_KEY),
                })
            }
            (Some(_), _) => {
                warn!("Discarding a stored session without administrator role.");
                for key in SESSION_KEYS {
                    store.remove(key);
                }
                AuthState::Unauthenticated
            }
            (None, _) => AuthState::Unauthenticated,
        };
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                state: RwLock::new(state),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// The bearer token to attach to requests
    pub fn token(&self) -> Option<String> {
        self.state().session().map(|s| s.token.clone())
    }

    /// Call `listener` after every transition
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Turn a login reply into a session, if the account is an administrator
    ///
    /// Nothing is persisted for other roles.
    pub fn establish(&self, reply: LoginReply) -> Result<Session, LoginError> {
        if reply.user.role != ADMIN_ROLE {
            warn!(role = %reply.user.role, "Rejected login of a non-admin account.");
            return Err(LoginError::AccessDenied);
        }
        let session = Session {
            token: reply.token,
            role: reply.user.role,
            name: reply.user.name,
            email: reply.user.email,
        };
        let store = &self.inner.store;
        store.set(TOKEN_KEY, &session.token);
        store.set(ROLE_KEY, &session.role);
        match &session.name {
            Some(name) => store.set(NAME_KEY, name),
            None => store.remove(NAME_KEY),
        }
        match &session.email {
            Some(email) => store.set(EMAIL_KEY, email),
            None => store.remove(EMAIL_KEY),
        }
        info!(name = ?session.name, "Administrator signed in.");
        self.transition(AuthState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Forget the session
    pub fn logout(&self) {
        info!("Signing out.");
        self.clear();
    }

    /// The backend no longer accepts our token
    pub fn expire(&self) {
        if self.is_authenticated() {
            warn!("The backend rejected the session token. Signing out.");
        }
        self.clear();
    }

    fn clear(&self) {
        for key in SESSION_KEYS {
            self.inner.store.remove(key);
        }
        self.transition(AuthState::Unauthenticated);
    }

    fn transition(&self, next: AuthState) {
        *self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next.clone();
        // call listeners outside of the lock so they may read the session again
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(&next);
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// A store whose contents tests can inspect after handing it to the session
    #[derive(Clone, Default)]
    struct SharedStore(Arc<MemoryStore>);
    impl SessionStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) {
            self.0.remove(key)
        }
    }

    fn reply(role: &str) -> LoginReply {
        serde_json::from_value(serde_json::json!({
            "token": "t0k3n",
            "user": { "role": role, "fullName": "Ada Admin", "email": "ada@example.org" }
        }))
        .unwrap()
    }

    #[test]
    fn admin_login_persists_the_session() {
        let store = SharedStore::default();
        let session = SessionContext::load(store.clone());
        assert!(!session.is_authenticated());

        let established = session.establish(reply("Admin")).unwrap();
        assert_eq!(established.name.as_deref(), Some("Ada Admin"));
        assert_eq!(session.token().as_deref(), Some("t0k3n"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t0k3n"));
        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("Admin"));

        // a reload finds the same session again
        let reloaded = SessionContext::load(store.clone());
        assert_eq!(reloaded.state(), session.state());
    }

    #[test]
    fn non_admin_login_is_denied_and_not_persisted() {
        let store = SharedStore::default();
        let session = SessionContext::load(store.clone());
        let err = session.establish(reply("Member")).unwrap_err();
        assert!(matches!(err, LoginError::AccessDenied));
        assert_eq!(
            err.to_string(),
            "Access denied. Only administrators can login."
        );
        assert!(store.0.is_empty());
        assert_eq!(session.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn logout_clears_every_key() {
        let store = SharedStore(Arc::new(MemoryStore::with_entries([
            (TOKEN_KEY, "t"),
            (ROLE_KEY, "Admin"),
            (NAME_KEY, "Ada"),
            (EMAIL_KEY, "ada@example.org"),
            ("user", "{}"),
        ])));
        let session = SessionContext::load(store.clone());
        assert!(session.is_authenticated());
        session.logout();
        assert!(store.0.is_empty());
        assert!(!SessionContext::load(store).is_authenticated());
    }

    #[test]
    fn stored_non_admin_tokens_are_discarded() {
        let store = SharedStore(Arc::new(MemoryStore::with_entries([
            (TOKEN_KEY, "t"),
            (ROLE_KEY, "Trainer"),
        ])));
        let session = SessionContext::load(store.clone());
        assert!(!session.is_authenticated());
        assert!(store.0.is_empty());
    }

    #[test]
    fn listeners_see_every_transition() {
        let session = SessionContext::load(MemoryStore::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let observer = session.clone();
        session.subscribe(move |state| {
            // reading the session from inside a listener must not deadlock
            assert_eq!(observer.is_authenticated(), state.is_authenticated());
            counter.fetch_add(1, Ordering::SeqCst);
        });
        session.establish(reply("Admin")).unwrap();
        session.expire();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
