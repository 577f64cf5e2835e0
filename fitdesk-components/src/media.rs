//! Previewing stored media and picking new files

use std::sync::{Arc, Mutex};

use fitdesk_shared::record::resolve_media_url;
use fitdesk_shared::schema::{FieldSpec, MediaAccept};
use fitdesk_shared::urls::MEDIA_BASE_URL;
use human_bytes::human_bytes;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::buttons::ButtonIcon;
use crate::context::PageState;
use crate::icons::TrashIcon;
use crate::transport::{revoke_preview, PickedFile};

/// Show one image or video
#[component]
pub fn MediaPreview(
    /// Anything the browser can load: an object url or a resolved backend path
    src: String,
    accept: MediaAccept,
    #[prop(default = "h-24 w-24")] inner_class: &'static str,
) -> impl IntoView {
    match accept {
        MediaAccept::Image => view! {
            <img src=src class=format!("{inner_class} object-cover rounded-md border border-gray-200") />
        }
        .into_any(),
        MediaAccept::Video => view! {
            <video src=src controls class=format!("{inner_class} rounded-md border border-gray-200") />
        }
        .into_any(),
    }
}

/// Previews for paths stored by the backend
#[component]
pub fn StoredMedia(paths: Vec<String>, accept: MediaAccept) -> impl IntoView {
    if paths.is_empty() {
        return view! { <span class="text-sm text-gray-400">"No media"</span> }.into_any();
    }
    view! {
        <div class="flex flex-wrap gap-2">
            {paths
                .into_iter()
                .map(|path| view! {
                    <MediaPreview src=resolve_media_url(MEDIA_BASE_URL, &path) accept=accept />
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Preview urls of every file picked in the open form
fn preview_urls(state: &PageState) -> Vec<String> {
    let Some(form) = &state.form else {
        return Vec::new();
    };
    state
        .schema
        .media_fields()
        .filter_map(|field| form.media(field.key))
        .flat_map(|media| media.files.iter().filter_map(|f| f.preview.clone()))
        .collect()
}

/// Urls in `live` that are no longer part of `current`
fn dropped<'a>(live: &'a [String], current: &'a [String]) -> impl Iterator<Item = &'a String> {
    live.iter().filter(move |url| !current.contains(url))
}

/// Revoke preview urls once their file left the form, and all of them when the page goes away
///
/// Files leave the form when they are replaced or removed, and when the form is closed or saved.
pub fn release_dropped_previews(state: RwSignal<PageState>) {
    let live = Arc::new(Mutex::new(Vec::<String>::new()));

    let tracked = live.clone();
    Effect::new(move |_| {
        let current = state.with(preview_urls);
        let Ok(mut live) = tracked.lock() else {
            return;
        };
        dropped(&live, &current).for_each(|url| revoke_preview(url));
        *live = current;
    });

    on_cleanup(move || {
        if let Ok(live) = live.lock() {
            live.iter().for_each(|url| revoke_preview(url));
        }
    });
}

#[component]
pub fn FileItem(
    file: PickedFile,
    accept: MediaAccept,
    #[prop(into)] processing_reader: Signal<bool>,
    on_remove: impl Fn(MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <li class="border border-gray-200 rounded-lg mb-2 p-3">
            <div class="flex items-center gap-3">
                {file.preview.clone().map(|src| view! {
                    <MediaPreview src=src accept=accept inner_class="h-12 w-12" />
                })}
                <div class="flex-1 min-w-0">
                    <p class="text-sm font-medium text-gray-900 truncate">
                        {file.name.clone()}
                    </p>
                    <p class="text-sm text-gray-500 truncate">
                        Size: {human_bytes(file.size)}
                    </p>
                </div>
                <ButtonIcon
                    busy_reader=processing_reader
                    on_click=on_remove
                    title="Remove file"
                    danger=true
                    inner_icon=|| view! { <TrashIcon inner_class="w-6 h-6" /> }
                    >
                </ButtonIcon>
            </div>
        </li>
    }
}

/// File input for a media field of the open form
///
/// A new pick replaces the previous one. Stored media are shown until replaced or cleared.
/// Preview urls are released by [`release_dropped_previews`].
#[component]
pub fn MediaInput(field: &'static FieldSpec, state: RwSignal<PageState>) -> impl IntoView {
    let Some(spec) = field.media_spec().copied() else {
        return ().into_any();
    };
    let key = field.key;
    let pending = Signal::derive(move || state.with(|s| s.pending));

    let picked = Memo::new(move |_| {
        state.with(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.media(key))
                .map(|m| m.files.iter().map(|f| (f.name.clone(), f.size)).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let stored = Memo::new(move |_| {
        state.with(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.media(key))
                .map(|m| (m.existing.clone(), m.clear))
                .unwrap_or_default()
        })
    });

    let replace_files = move |files: Vec<PickedFile>| {
        state.update(|s| {
            if let Some(form) = s.form.as_mut() {
                form.set_files(key, files);
            }
        });
    };

    let on_change = move |input: web_sys::HtmlInputElement| {
        let files: Vec<PickedFile> = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .map(PickedFile::new)
            .collect();
        // allow picking the same file again after removing it
        input.set_value("");
        replace_files(files);
    };

    let remove_at = move |index: usize| {
        let remaining = state.with_untracked(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.media(key))
                .map(|m| {
                    m.files
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != index)
                        .map(|(_, f)| f.clone())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        });
        replace_files(remaining);
    };

    let files_view = move || {
        let count = picked.get().len();
        (0..count)
            .filter_map(|index| {
                state.with_untracked(|s| {
                    s.form
                        .as_ref()
                        .and_then(|f| f.media(key))
                        .and_then(|m| m.files.get(index).cloned())
                })
                .map(|file| {
                    view! {
                        <FileItem
                            file=file
                            accept=spec.accept
                            processing_reader=pending
                            on_remove=move |_| remove_at(index) />
                    }
                })
            })
            .collect_view()
    };

    view! {
        <div class="flex flex-col gap-2">
            {move || {
                let (existing, clear) = stored.get();
                if clear {
                    view! { <p class="text-sm text-rose-600">"The current media will be removed."</p> }.into_any()
                } else if picked.get().is_empty() && !existing.is_empty() {
                    view! {
                        <div>
                            <p class="text-xs text-gray-500 mb-1">"Current"</p>
                            <StoredMedia paths=existing accept=spec.accept />
                        </div>
                    }
                    .into_any()
                } else {
                    ().into_any()
                }
            }}
            <input
                type="file"
                accept=spec.accept.mime_pattern()
                multiple=spec.multiple
                class="block w-full text-sm text-gray-700 file:mr-4 file:rounded-lg file:border-0 file:bg-violet-50 file:px-4 file:py-2 file:text-violet-700 hover:file:bg-violet-100"
                on:change:target=move |ev| on_change(ev.target())
            />
            <ul role="list">{files_view}</ul>
            {spec.clear_flag.map(|_| view! {
                <Show when=move || !stored.get().0.is_empty()>
                    <label class="inline-flex items-center gap-2 text-sm text-gray-700">
                        <input
                            type="checkbox"
                            prop:checked=move || stored.get().1
                            on:change:target=move |ev| {
                                let clear = ev.target().checked();
                                state.update(|s| {
                                    if let Some(form) = s.form.as_mut() {
                                        form.set_clear(key, clear);
                                    }
                                });
                            }
                        />
                        "Remove current media"
                    </label>
                </Show>
            })}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod test {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn replaced_files_drop_only_their_previews() {
        let live = urls(&["blob:a", "blob:b", "blob:c"]);
        let current = urls(&["blob:b", "blob:d"]);
        let gone: Vec<&String> = dropped(&live, &current).collect();
        assert_eq!(gone, vec!["blob:a", "blob:c"]);
    }

    #[test]
    fn closing_the_form_drops_every_preview() {
        let live = urls(&["blob:a", "blob:b"]);
        assert_eq!(dropped(&live, &[]).count(), 2);
        assert_eq!(dropped(&[], &live).count(), 0);
    }
}
