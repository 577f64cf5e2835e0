use fitdesk_components::context::{provide_console_context, use_auth};
use fitdesk_components::resource::ResourcePage;
use fitdesk_shared::resources;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{ProtectedParentRoute, Redirect, Route, Router, Routes},
    hooks::use_params_map,
    path,
};

mod dashboard;
mod layout;
mod login;

use dashboard::Dashboard;
use layout::ConsoleLayout;
use login::LoginPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_console_context();
    let auth = use_auth();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/fitdesk.css" />

        // sets the document title
        <Title text="fitdesk - admin console" />

        <div class="min-h-screen bg-gray-50 text-gray-900">
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("login") view=LoginPage />
                    <Route path=path!("") view=|| view! { <Redirect path="/overview" /> } />
                    // undecided (None) until the browser has read the stored session
                    <ProtectedParentRoute
                        path=path!("")
                        view=ConsoleLayout
                        condition=move || auth.signed_in()
                        redirect_path=|| "/login"
                    >
                        <Route path=path!("overview") view=Dashboard />
                        <Route path=path!(":resource") view=ResourceRoute />
                    </ProtectedParentRoute>
                </Routes>
            </Router>
        </div>
    }
}

/// The page of the content type named by the route, e.g. `/pricing`
#[component]
fn ResourceRoute() -> impl IntoView {
    let params = use_params_map();
    let schema = Memo::new(move |_| {
        params.with(|p| p.get("resource").and_then(|key| resources::by_key(&key)))
    });

    // a new page, with its own state and requests, for every content type
    move || match schema.get() {
        Some(schema) => view! { <ResourcePage schema=schema /> }.into_any(),
        None => "Page not found.".into_any(),
    }
}
