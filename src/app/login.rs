//! Sign in with email and password

use fitdesk_components::buttons::Button;
use fitdesk_components::context::{use_api, use_auth};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use tracing::warn;

const LOGIN_INPUT_CLASSES: &str = "block w-full p-2.5 rounded-lg border border-gray-300 bg-gray-50 text-sm text-gray-900 focus:ring-violet-500 focus:border-violet-500";

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let login_action = Action::new_local(move |(email, password): &(String, String)| {
        let api = api.clone();
        let email = email.clone();
        let password = password.clone();
        async move {
            match api.login(&email, &password).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!("Login failed: {e:?}");
                    Err(e.to_string())
                }
            }
        }
    });
    let login_pending = login_action.pending();
    let login_reply = login_action.value();

    // covers both an existing session and a successful login
    let navigate = use_navigate();
    Effect::new(move |_| {
        if auth.signed_in() == Some(true) {
            navigate("/overview", Default::default());
        }
    });

    view! {
        <div class="flex min-h-screen items-center justify-center p-4">
            <form
                class="w-full max-w-sm space-y-4 rounded-lg bg-white p-8 shadow-md"
                on:submit=move |ev| {
                    ev.prevent_default();
                    login_action.dispatch_local((email.get_untracked(), password.get_untracked()));
                }
            >
                <h1 class="text-2xl font-bold text-gray-900">"Admin login"</h1>
                {move || {
                    login_reply
                        .get()
                        .and_then(Result::err)
                        .map(|message| {
                            view! {
                                <p role="alert" class="p-3 rounded-lg bg-rose-50 text-sm text-rose-800">
                                    {message}
                                </p>
                            }
                        })
                }}
                <label class="block">
                    <span class="block mb-1 text-sm font-medium text-gray-900">"Email"</span>
                    <input type="email" required autocomplete="username" class=LOGIN_INPUT_CLASSES bind:value=email />
                </label>
                <label class="block">
                    <span class="block mb-1 text-sm font-medium text-gray-900">"Password"</span>
                    <input
                        type="password"
                        required
                        autocomplete="current-password"
                        class=LOGIN_INPUT_CLASSES
                        bind:value=password
                    />
                </label>
                <Button
                    kind="submit"
                    label="Login"
                    busy_label="Logging in..."
                    busy_reader=login_pending
                    on_click=|_| {} />
            </form>
        </div>
    }
}
