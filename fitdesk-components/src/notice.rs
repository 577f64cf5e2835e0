use fitdesk_shared::manager::{Notice, NoticeKind};
use leptos::prelude::*;

use crate::icons::{CheckIcon, CloseIcon, InfoIcon};

/// The outcome of the last operation, until dismissed
#[component]
pub fn NoticeBanner(
    #[prop(into)] notice: Signal<Option<Notice>>,
    on_dismiss: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    let on_dismiss = std::sync::Arc::new(on_dismiss);
    move || {
        let on_dismiss = on_dismiss.clone();
        notice.get().map(|notice| {
            let (colors, icon) = match notice.kind {
                NoticeKind::Info => (
                    "bg-green-50 text-green-800 border-green-200",
                    view! { <CheckIcon /> }.into_any(),
                ),
                NoticeKind::Error => (
                    "bg-rose-50 text-rose-800 border-rose-200",
                    view! { <InfoIcon /> }.into_any(),
                ),
            };
            view! {
                <div role="alert" class=format!("flex items-center gap-3 p-3 mb-4 border rounded-lg {colors}")>
                    {icon}
                    <p class="flex-1 text-sm">{notice.message}</p>
                    <button type="button" title="Dismiss" on:click=move |_| on_dismiss()>
                        <CloseIcon inner_class="w-4 h-4" />
                    </button>
                </div>
            }
        })
    }
}

/// A dialog above a dimmed page
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    on_close: impl Fn() + Send + Sync + 'static,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-40 flex items-start justify-center overflow-y-auto bg-stone-900/50 backdrop-blur-[2px] p-4 md:p-10">
            <div role="dialog" aria-modal="true" class="relative w-full max-w-2xl rounded-lg bg-white p-6 shadow-lg">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold text-gray-900">{move || title.get()}</h2>
                    <button type="button" title="Close" class="text-gray-500 hover:text-gray-800" on:click=move |_| on_close()>
                        <CloseIcon />
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}
