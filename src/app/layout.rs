//! Sidebar navigation around every signed-in page

use fitdesk_components::context::{use_api, use_auth};
use fitdesk_components::icons::{LogoutIcon, MenuIcon};
use fitdesk_shared::resources;
use leptos::prelude::*;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::use_navigate;

const NAV_LINK_CLASSES: &str = "block px-4 py-2 rounded-lg text-sm font-medium text-gray-700 hover:bg-violet-50 aria-[current=page]:bg-violet-100 aria-[current=page]:text-violet-800";

#[component]
fn NavLink(href: String, label: &'static str) -> impl IntoView {
    view! {
        <li>
            <A href=href attr:class=NAV_LINK_CLASSES>
                {label}
            </A>
        </li>
    }
}

#[component]
pub fn ConsoleLayout() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();
    let sidebar_open = RwSignal::new(true);

    let user_name = move || {
        auth.0.with(|state| {
            state
                .as_ref()
                .and_then(|s| s.session())
                .and_then(|s| s.name.clone().or_else(|| s.email.clone()))
                .unwrap_or_default()
        })
    };
    let logout = move |_| {
        api.session().logout();
        navigate("/login", Default::default());
    };

    view! {
        <div class="flex min-h-screen">
            <aside
                class="shrink-0 border-r border-gray-200 bg-white transition-all"
                class=("w-64", move || sidebar_open.get())
                class=("w-16", move || !sidebar_open.get())
            >
                <div class="flex items-center justify-between p-4">
                    <Show when=move || sidebar_open.get()>
                        <span class="text-lg font-bold text-violet-800">"Fitdesk"</span>
                    </Show>
                    <button
                        type="button"
                        title="Toggle navigation"
                        class="p-1 rounded text-gray-600 hover:bg-gray-100"
                        on:click=move |_| sidebar_open.update(|open| *open = !*open)
                    >
                        <MenuIcon />
                    </button>
                </div>
                <Show when=move || sidebar_open.get()>
                    <nav class="px-2">
                        <ul class="space-y-1">
                            <NavLink href="/overview".to_string() label="Overview" />
                            {resources::ALL
                                .iter()
                                .map(|schema| {
                                    view! {
                                        <NavLink href=format!("/{}", schema.key) label=schema.label />
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </nav>
                    <div class="mt-6 px-4 border-t border-gray-200 pt-4">
                        <p class="text-xs text-gray-500 truncate">{user_name}</p>
                    </div>
                </Show>
                <div class="px-2 mt-2">
                    <button
                        type="button"
                        title="Logout"
                        class="flex items-center gap-2 w-full px-4 py-2 rounded-lg text-sm font-medium text-rose-700 hover:bg-rose-50"
                        on:click=logout
                    >
                        <LogoutIcon />
                        <Show when=move || sidebar_open.get()>"Logout"</Show>
                    </button>
                </div>
            </aside>
            <main class="grow min-w-0">
                <Outlet />
            </main>
        </div>
    }
}
