use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::icons::SpinIcon;

/// A round button showing only an icon
#[component]
pub fn ButtonIcon<F, IV>(
    #[prop(into)] busy_reader: Signal<bool>,
    on_click: impl Fn(MouseEvent) + 'static,
    inner_icon: F,
    #[prop(default = "")] title: &'static str,
    #[prop(default = false)] danger: bool,
) -> impl IntoView
where
    F: Fn() -> IV,
    IV: IntoView,
{
    view! {
        <button
            type="button"
            title=title
            disabled=move || busy_reader.get()
            class="inline-flex items-center text-base font-semibold text-gray-500 cursor-pointer ml-2 p-2 rounded-full disabled:opacity-50"
            class=("hover:text-violet-500", !danger)
            class=("hover:bg-violet-100", !danger)
            class=("hover:text-rose-600", danger)
            class=("hover:bg-rose-100", danger)
            on:click=move |ev| {
                if !busy_reader.get() {
                    on_click(ev);
                }
            }
        >
            {inner_icon()}
        </button>
    }
}

/// The main call to action of a form, showing a spinner while busy
#[component]
pub fn Button(
    #[prop(into)] busy_reader: Signal<bool>,
    on_click: impl Fn(MouseEvent) + 'static,
    #[prop(default = "")] label: &'static str,
    #[prop(default = "")] busy_label: &'static str,
    #[prop(default = "button")] kind: &'static str,
) -> impl IntoView {
    view! {
        <button
            type=kind
            class="h-9 px-4 flex justify-center items-center space-x-4 w-full text-white bg-violet-700 hover:bg-violet-800 focus:ring-4 focus:outline-none focus:ring-violet-300 font-medium rounded-lg text-sm text-center disabled:opacity-60"
            disabled=move || busy_reader.get()
            on:click=move |ev| {
                if !busy_reader.get() {
                    on_click(ev);
                }
            }
        >

            <Show when=move || busy_reader.get()>
                <SpinIcon inner_class="animate-spin h-5 w-5 mr-2 text-white" />
            </Show>

            {move || if busy_reader.get() { busy_label.to_string() } else { label.to_string() }}
        </button>
    }
}

/// A plain outlined button for secondary actions
#[component]
pub fn SecondaryButton(
    on_click: impl Fn(MouseEvent) + 'static,
    label: &'static str,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="h-9 px-4 rounded-lg border border-gray-300 text-sm font-medium text-gray-700 hover:bg-gray-100"
            on:click=on_click
        >
            {label}
        </button>
    }
}
