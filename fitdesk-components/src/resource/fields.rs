//! One input per field kind, bound to the open form

use fitdesk_shared::form::FormState;
use fitdesk_shared::schema::{FieldKind, FieldSpec};
use leptos::prelude::*;

use crate::buttons::ButtonIcon;
use crate::context::PageState;
use crate::icons::{PlusIcon, TrashIcon};
use crate::media::MediaInput;
use crate::transport::PickedFile;
use crate::TEXTAREA_DEFAULT_ROWS;

const INPUT_CLASSES: &str = "block w-full rounded-lg border border-gray-300 bg-gray-50 p-2 text-sm text-gray-900 focus:border-violet-500 focus:ring-violet-500";

/// Change the open form, if there is one
fn edit_form(state: RwSignal<PageState>, f: impl FnOnce(&mut FormState<PickedFile>)) {
    state.update(|s| {
        if let Some(form) = s.form.as_mut() {
            f(form);
        }
    });
}

fn form_text(state: RwSignal<PageState>, key: &'static str) -> String {
    state.with(|s| {
        s.form
            .as_ref()
            .map(|f| f.text(key).to_string())
            .unwrap_or_default()
    })
}

#[component]
pub fn FieldInput(field: &'static FieldSpec, state: RwSignal<PageState>) -> impl IntoView {
    let key = field.key;
    let set_text = move |value: String| edit_form(state, |f| f.set_text(key, value));

    let input = match field.kind {
        FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Time => {
            let input_type = match field.kind {
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                FieldKind::Time => "time",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    step=matches!(field.kind, FieldKind::Number).then_some("any")
                    class=INPUT_CLASSES
                    required=field.required
                    prop:value=move || form_text(state, key)
                    on:input:target=move |ev| set_text(ev.target().value())
                />
            }
            .into_any()
        }
        FieldKind::LongText => view! {
            <textarea
                class=INPUT_CLASSES
                rows=TEXTAREA_DEFAULT_ROWS
                required=field.required
                prop:value=move || form_text(state, key)
                on:input:target=move |ev| set_text(ev.target().value())
            />
        }
        .into_any(),
        FieldKind::Flag => view! {
            <input
                type="checkbox"
                class="h-4 w-4 rounded border-gray-300 text-violet-600"
                prop:checked=move || state.with(|s| s.form.as_ref().is_some_and(|f| f.flag(key)))
                on:change:target=move |ev| {
                    let checked = ev.target().checked();
                    edit_form(state, |f| f.set_flag(key, checked));
                }
            />
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <select
                class=INPUT_CLASSES
                required=field.required
                prop:value=move || form_text(state, key)
                on:change:target=move |ev| set_text(ev.target().value())
            >
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! {
                            <option value=option selected=move || form_text(state, key) == option>
                                {option}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::TextList => view! { <TextListInput field=field state=state /> }.into_any(),
        FieldKind::Media(_) => view! { <MediaInput field=field state=state /> }.into_any(),
    };

    view! {
        <div class="mb-4">
            <label class="block mb-1 text-sm font-medium text-gray-900">
                {field.label}
                {field.required.then_some(view! { <span class="text-rose-600">" *"</span> })}
            </label>
            {input}
        </div>
    }
}

/// Independently editable entries with add and remove buttons
#[component]
fn TextListInput(field: &'static FieldSpec, state: RwSignal<PageState>) -> impl IntoView {
    let key = field.key;
    let busy = Signal::derive(move || state.with(|s| s.pending));
    // only rebuild the inputs when entries are added or removed, not on every keystroke
    let count = Memo::new(move |_| {
        state.with(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.list(key))
                .map(|l| l.len())
                .unwrap_or_default()
        })
    });
    let entry = move |index: usize| {
        state.with(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.list(key))
                .and_then(|l| l.entries().get(index).cloned())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="flex flex-col gap-2">
            {move || {
                (0..count.get())
                    .map(|index| view! {
                        <div class="flex items-center">
                            <input
                                type="text"
                                class=INPUT_CLASSES
                                placeholder=format!("{} #{}", field.label, index + 1)
                                prop:value=move || entry(index)
                                on:input:target=move |ev| {
                                    let value = ev.target().value();
                                    edit_form(state, |f| {
                                        if let Some(list) = f.list_mut(key) {
                                            list.set(index, value);
                                        }
                                    });
                                }
                            />
                            <ButtonIcon
                                busy_reader=busy
                                title="Remove entry"
                                danger=true
                                on_click=move |_| edit_form(state, |f| {
                                    if let Some(list) = f.list_mut(key) {
                                        list.remove(index);
                                    }
                                })
                                inner_icon=|| view! { <TrashIcon /> }
                            />
                        </div>
                    })
                    .collect_view()
            }}
            <div>
                <button
                    type="button"
                    class="inline-flex items-center gap-1 text-sm font-medium text-violet-700 hover:text-violet-900"
                    on:click=move |_| edit_form(state, |f| {
                        if let Some(list) = f.list_mut(key) {
                            list.push_empty();
                        }
                    })
                >
                    <PlusIcon inner_class="w-4 h-4" />
                    "Add entry"
                </button>
            </div>
        </div>
    }
}
