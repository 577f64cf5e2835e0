//! The api client and session state shared by every page

use fitdesk_shared::api::ApiClient;
use fitdesk_shared::session::{AuthState, SessionContext};
use fitdesk_shared::urls::API_BASE_URL;
use leptos::prelude::*;

use crate::storage::LocalSessionStore;
use crate::transport::{BrowserTransport, PickedFile};

/// The api client used throughout the console
pub type Api = ApiClient<BrowserTransport>;

/// Resource state as kept by the pages
pub type PageState = fitdesk_shared::manager::ResourceState<PickedFile>;

/// The session as the views see it
///
/// `None` until the browser has read the stored session. The server never knows it, so views
/// rendered there and during hydration agree.
#[derive(Debug, Clone, Copy)]
pub struct Auth(pub RwSignal<Option<AuthState>>);
impl Auth {
    /// `None` while undecided, otherwise whether an administrator is signed in
    pub fn signed_in(&self) -> Option<bool> {
        self.0.with(|state| state.as_ref().map(AuthState::is_authenticated))
    }
}

/// Create the session and api client and provide them to the component tree
///
/// Call once, at the root of the app.
pub fn provide_console_context() {
    let session = SessionContext::load(LocalSessionStore::open());
    let auth = Auth(RwSignal::new(None));

    session.subscribe(move |state| {
        let _ = auth.0.try_set(Some(state.clone()));
    });
    // effects only run in the browser, after hydration
    let loaded = session.clone();
    Effect::new(move |_| {
        auth.0.set(Some(loaded.state()));
    });

    provide_context(ApiClient::new(
        BrowserTransport::new(),
        API_BASE_URL,
        session,
    ));
    provide_context(auth);
}

pub fn use_api() -> Api {
    use_context::<Api>().expect("App provides the api client")
}

pub fn use_auth() -> Auth {
    use_context::<Auth>().expect("App provides the session state")
}
