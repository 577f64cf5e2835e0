use fitdesk_shared::record::ContentRecord;
use fitdesk_shared::schema::{FieldKind, FieldSpec, ResourceSchema};
use leptos::prelude::*;

use crate::media::StoredMedia;

/// Server-assigned timestamps shown below the fields
const TIMESTAMPS: &[(&str, &str)] = &[("createdAt", "Created"), ("updatedAt", "Last updated")];

fn field_value(record: &ContentRecord, field: &FieldSpec) -> AnyView {
    match field.kind {
        FieldKind::Media(spec) => view! {
            <StoredMedia paths=record.media(field.record_path) accept=spec.accept />
        }
        .into_any(),
        FieldKind::TextList => {
            let entries = record.texts(field.record_path);
            if entries.is_empty() {
                view! { <span class="text-gray-400">"-"</span> }.into_any()
            } else {
                view! {
                    <ul class="list-disc pl-5">
                        {entries.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                }
                .into_any()
            }
        }
        _ => view! { <span class="whitespace-pre-line">{record.display(field)}</span> }.into_any(),
    }
}

/// Everything stored for one record
#[component]
pub fn RecordDetail(schema: &'static ResourceSchema, record: ContentRecord) -> impl IntoView {
    let fields = schema
        .fields
        .iter()
        .map(|field| {
            view! {
                <div class="py-2">
                    <dt class="text-sm font-semibold text-gray-600">{field.label}</dt>
                    <dd class="mt-1 text-gray-900">{field_value(&record, field)}</dd>
                </div>
            }
        })
        .collect_view();
    let timestamps = TIMESTAMPS
        .iter()
        .filter_map(|(key, label)| {
            record.text(key).map(|value| {
                view! {
                    <p class="text-xs text-gray-500">{format!("{label}: {value}")}</p>
                }
            })
        })
        .collect_view();

    view! {
        <h3 class="text-lg font-bold mb-2">{schema.title_of(&record)}</h3>
        <dl class="divide-y divide-gray-100">{fields}</dl>
        <div class="mt-4">{timestamps}</div>
    }
}
