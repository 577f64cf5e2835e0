use fitdesk_shared::record::ContentRecord;
use fitdesk_shared::schema::ResourceSchema;
use leptos::prelude::*;

use crate::buttons::ButtonIcon;
use crate::icons::{EyeIcon, PencilIcon, TrashIcon};

/// Overview of every listed record with its actions
#[component]
pub fn RecordTable(
    schema: &'static ResourceSchema,
    #[prop(into)] items: Signal<Vec<ContentRecord>>,
    #[prop(into)] busy: Signal<bool>,
    on_details: Callback<String>,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let columns = schema.table_fields().collect::<Vec<_>>();
    let header = columns
        .iter()
        .map(|field| view! { <th scope="col" class="px-4 py-3">{field.label}</th> })
        .collect_view();

    let rows = move || {
        let columns = columns.clone();
        items.with(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    let cells = columns
                        .iter()
                        .map(|field| view! { <td class="px-4 py-3">{record.display(field)}</td> })
                        .collect_view();
                    let id = record.id.clone();
                    let (details_id, edit_id, delete_id) = (id.clone(), id.clone(), id);
                    view! {
                        <tr class="border-b border-gray-200 bg-white hover:bg-gray-50">
                            <td class="px-4 py-3 text-gray-500">{index + 1}</td>
                            {cells}
                            <td class="px-4 py-3 text-right whitespace-nowrap">
                                <ButtonIcon
                                    busy_reader=busy
                                    title="Details"
                                    on_click=move |_| on_details.run(details_id.clone())
                                    inner_icon=|| view! { <EyeIcon /> }
                                />
                                {(!schema.read_only).then(|| view! {
                                    <ButtonIcon
                                        busy_reader=busy
                                        title="Edit"
                                        on_click=move |_| on_edit.run(edit_id.clone())
                                        inner_icon=|| view! { <PencilIcon /> }
                                    />
                                    <ButtonIcon
                                        busy_reader=busy
                                        title="Delete"
                                        danger=true
                                        on_click=move |_| on_delete.run(delete_id.clone())
                                        inner_icon=|| view! { <TrashIcon /> }
                                    />
                                })}
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="relative overflow-x-auto rounded-lg shadow-sm">
            <table class="w-full text-sm text-left text-gray-700">
                <thead class="text-xs uppercase bg-gray-100 text-gray-600">
                    <tr>
                        <th scope="col" class="px-4 py-3">"#"</th>
                        {header}
                        <th scope="col" class="px-4 py-3 text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Show when=move || items.with(Vec::is_empty)>
                <p class="p-6 text-center text-gray-500">{format!("No {} yet.", schema.label.to_lowercase())}</p>
            </Show>
        </div>
    }
}
