use fitdesk_components::context::use_auth;
use fitdesk_shared::resources;
use fitdesk_shared::session::Session;
use leptos::prelude::*;
use leptos_router::components::A;

/// Landing page after login
#[component]
pub fn Dashboard() -> impl IntoView {
    let auth = use_auth();
    let session = move || auth.0.with(|s| s.as_ref().and_then(|s| s.session().cloned()));
    let field = move |f: fn(&Session) -> Option<String>| {
        move || session().and_then(|s| f(&s)).unwrap_or_else(|| "-".to_string())
    };

    view! {
        <section class="p-4 md:p-8">
            <h1 class="text-2xl font-bold mb-2">
                "Welcome, "
                {field(|s| s.name.clone())}
            </h1>
            <dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 mb-8 text-sm">
                <dt class="font-semibold text-gray-600">"Email"</dt>
                <dd>{field(|s| s.email.clone())}</dd>
                <dt class="font-semibold text-gray-600">"Role"</dt>
                <dd>{field(|s| Some(s.role.clone()))}</dd>
            </dl>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                {resources::MANAGED
                    .iter()
                    .map(|schema| {
                        view! {
                            <A
                                href=format!("/{}", schema.key)
                                attr:class="block p-6 rounded-lg border border-gray-200 bg-white shadow-sm hover:border-violet-400"
                            >
                                <h2 class="text-lg font-semibold text-violet-800">{schema.label}</h2>
                                <p class="text-sm text-gray-500">
                                    {format!("Manage {}", schema.label.to_lowercase())}
                                </p>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
