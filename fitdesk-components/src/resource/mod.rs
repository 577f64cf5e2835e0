//! The page managing one content type
//!
//! Every content type uses the same page; its [`ResourceSchema`] decides the columns, the form
//! fields and how the form is sent.

use fitdesk_shared::manager::{NoticeKind, ResourceManager, StateCell};
use fitdesk_shared::schema::ResourceSchema;
use leptos::ev::keydown;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_use::{use_document, use_event_listener};

use crate::buttons::{Button, SecondaryButton};
use crate::confirm::browser_confirm;
use crate::context::{use_api, PageState};
use crate::icons::{PlusIcon, SpinIcon};
use crate::media::release_dropped_previews;
use crate::notice::{Modal, NoticeBanner};
use crate::transport::{BrowserTransport, PickedFile};

mod detail;
mod fields;
mod table;

use detail::RecordDetail;
use fields::FieldInput;
use table::RecordTable;

/// Page state kept in a signal
///
/// Once the page is gone the signal is disposed, and responses arriving later are dropped.
#[derive(Debug, Clone, Copy)]
pub struct SignalCell(pub RwSignal<PageState>);
impl StateCell<PickedFile> for SignalCell {
    fn with_state<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

#[component]
pub fn ResourcePage(schema: &'static ResourceSchema) -> impl IntoView {
    let state = RwSignal::new(PageState::new(schema));
    let manager = ResourceManager::new(SignalCell(state));
    // requests of this page are aborted when it is left
    let api = StoredValue::new(use_api().rebind(BrowserTransport::scoped()));
    release_dropped_previews(state);

    let refresh = move || {
        spawn_local(async move {
            let _ = manager.list(&api.get_value()).await;
        })
    };
    // effects only run in the browser
    Effect::new(move |_| refresh());

    let submit = move || {
        spawn_local(async move {
            let _ = manager.submit(&api.get_value()).await;
        })
    };
    let on_delete = Callback::new(move |id: String| {
        spawn_local(async move {
            let _ = manager.delete(&api.get_value(), &id, &browser_confirm).await;
        })
    });
    let on_details = Callback::new(move |id: String| {
        state.update(|s| {
            s.show_details(&id);
        })
    });
    let on_edit = Callback::new(move |id: String| {
        state.update(|s| {
            s.select_for_edit(&id);
        })
    });

    // <esc> closes the form first, then the details
    let _ = use_event_listener(use_document(), keydown, move |ev| {
        if ev.key() == "Escape" {
            state.update(|s| {
                if s.form.is_some() {
                    s.close_form();
                } else {
                    s.close_details();
                }
            });
        }
    });

    let items = Memo::new(move |_| state.with(|s| s.items.clone()));
    let detail = Memo::new(move |_| state.with(|s| s.detail.clone()));
    let form_open = Memo::new(move |_| state.with(|s| s.form.is_some()));
    let is_edit = Memo::new(move |_| state.with(|s| s.form.as_ref().is_some_and(|f| f.is_edit())));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let pending = Signal::derive(move || state.with(|s| s.pending));
    let can_create = Signal::derive(move || state.with(|s| s.can_create()));

    let form_title = Signal::derive(move || {
        let verb = if is_edit.get() { "Edit" } else { "Add" };
        format!("{verb} {}", schema.singular)
    });

    view! {
        <section class="p-4 md:p-8">
            <div class="flex flex-wrap items-center justify-between gap-4 mb-6">
                <h1 class="text-2xl font-bold text-gray-900">{schema.label}</h1>
                <div class="flex items-center gap-2">
                    <SecondaryButton label="Refresh" on_click=move |_| refresh() />
                    <Show when=move || can_create.get()>
                        <button
                            type="button"
                            class="inline-flex items-center gap-2 h-9 px-4 rounded-lg bg-violet-700 text-sm font-medium text-white hover:bg-violet-800"
                            on:click=move |_| state.update(|s| {
                                s.open_new();
                            })
                        >
                            <PlusIcon />
                            {format!("Add {}", schema.singular)}
                        </button>
                    </Show>
                </div>
            </div>

            <NoticeBanner
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                on_dismiss=move || state.update(|s| s.dismiss_notice()) />

            <Show
                when=move || !loading.get() || !items.with(Vec::is_empty)
                fallback=|| view! {
                    <div class="flex items-center gap-2 p-6 text-gray-500">
                        <SpinIcon inner_class="animate-spin w-5 h-5" />
                        "Loading..."
                    </div>
                }
            >
                <RecordTable
                    schema=schema
                    items=items
                    busy=pending
                    on_details=on_details
                    on_edit=on_edit
                    on_delete=on_delete />
            </Show>

            {move || detail.get().map(|record| view! {
                <Modal
                    title=format!("{} details", schema.label)
                    on_close=move || state.update(|s| s.close_details())
                >
                    <RecordDetail schema=schema record=record />
                </Modal>
            })}

            <Show when=move || form_open.get()>
                <Modal title=form_title on_close=move || state.update(|s| s.close_form())>
                    <form on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }>
                        <NoticeBanner
                            notice=Signal::derive(move || state.with(|s| s.notice.clone().filter(|n| n.kind == NoticeKind::Error)))
                            on_dismiss=move || state.update(|s| s.dismiss_notice()) />
                        {schema
                            .fields
                            .iter()
                            .map(|field| view! { <FieldInput field=field state=state /> })
                            .collect_view()}
                        <div class="flex justify-end gap-2 mt-6">
                            <SecondaryButton label="Cancel" on_click=move |_| state.update(|s| s.close_form()) />
                            <div class="w-40">
                                <Button
                                    kind="submit"
                                    label="Save"
                                    busy_label="Saving..."
                                    busy_reader=pending
                                    on_click=|_| {} />
                            </div>
                        </div>
                    </form>
                </Modal>
            </Show>
        </section>
    }
}
