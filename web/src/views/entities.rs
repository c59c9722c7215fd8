use std::{collections::BTreeMap, marker::PhantomData};

use dioxus::prelude::*;
use types::{
    UserType,
    entity::Resource,
    form::{Draft, FieldSpec},
    listing::{ListQuery, ListState},
};
use ui::{ConfirmDialog, ErrorBanner, FilterBar, FormDialog, Pagination, use_toasts};

use crate::auth::use_auth;

#[derive(Props, Clone, PartialEq)]
pub struct EntityPageProps<R: Resource> {
    /// Which side of the API to talk to. Only admins may edit.
    pub scope: UserType,
    #[props(default)]
    pub resource: PhantomData<R>,
}

#[derive(Clone, PartialEq)]
enum Dialog<R> {
    Closed,
    Create,
    Edit(R),
    Delete(R),
}

/// Paginated, filterable table of `R` with create, edit and delete dialogs.
///
/// The list is refetched whenever the query changes; mutations bump the
/// query's revision instead of patching rows locally.
#[allow(non_snake_case)]
pub fn EntityPage<R: Resource>(props: EntityPageProps<R>) -> Element {
    let scope = props.scope;
    let can_edit = scope == UserType::Admin;

    let mut auth = use_auth();
    let mut toasts = use_toasts();
    let mut query = use_signal(ListQuery::default);
    let mut list = use_signal(ListState::<R>::default);
    let mut filter_draft = use_signal(Draft::default);
    let mut dialog = use_signal(|| Dialog::<R>::Closed);
    let mut busy = use_signal(|| false);

    use_effect(move || {
        let current = query();
        let ticket = list.write().begin();
        let api = auth.api();

        spawn(async move {
            tracing::debug!(endpoint = R::ENDPOINT, %scope, page = current.page_index, "fetching list");
            let result = api.list::<R>(scope, &current).await;
            let unauthorized = result.as_ref().is_err_and(|e| e.is_unauthorized());
            let past_end = result
                .as_ref()
                .ok()
                .and_then(|page| current.clamped_page(page.total_count));

            if !list.write().finish(ticket, result) {
                tracing::debug!(endpoint = R::ENDPOINT, "discarding stale response");
            } else if let Some(page_index) = past_end {
                tracing::debug!(endpoint = R::ENDPOINT, page_index, "page emptied, stepping back");
                query.write().go_to_page(page_index);
            }
            if unauthorized {
                auth.expire();
            }
        });
    });

    let mut save = move |id: Option<String>, draft: Draft| {
        busy.set(true);
        let api = auth.api();
        spawn(async move {
            let result = match &id {
                Some(id) => api.update::<R>(scope, id, &draft).await,
                None => api.create::<R>(scope, &draft).await,
            };
            busy.set(false);

            match result {
                Ok(()) => {
                    let verb = if id.is_some() { "updated" } else { "created" };
                    toasts.success(format!("{} {verb}", R::SINGULAR));
                    dialog.set(Dialog::Closed);
                    query.write().refresh();
                }
                Err(e) if e.is_unauthorized() => auth.expire(),
                Err(e) => {
                    tracing::warn!(error = %e, endpoint = R::ENDPOINT, "save failed");
                    toasts.error(e.to_string());
                }
            }
        });
    };

    let mut remove = move |record: R| {
        busy.set(true);
        let api = auth.api();
        spawn(async move {
            let result = api.delete::<R>(scope, record.id()).await;
            busy.set(false);

            match result {
                Ok(()) => {
                    toasts.success(format!("{} deleted", R::SINGULAR));
                    dialog.set(Dialog::Closed);
                    query.write().refresh();
                }
                Err(e) if e.is_unauthorized() => auth.expire(),
                Err(e) => {
                    tracing::warn!(error = %e, endpoint = R::ENDPOINT, id = record.id(), "delete failed");
                    toasts.error(e.to_string());
                }
            }
        });
    };

    let state = list.read();
    let rows = state.items().to_vec();
    let total_count = state.total_count();
    let loading = state.is_loading();
    let error = state.error().map(str::to_string);
    drop(state);

    let (singular, plural, description) = (R::SINGULAR, R::PLURAL, R::DESCRIPTION);
    let filter_fields: Vec<FieldSpec> = R::filters().copied().collect();
    let column_count = R::COLUMNS.len() + usize::from(can_edit);
    let is_empty = rows.is_empty();

    let dialog_view = match dialog() {
        Dialog::Closed => rsx! {},
        Dialog::Create => rsx! {
            FormDialog {
                title: format!("Add {}", R::SINGULAR),
                fields: R::FIELDS,
                initial: Draft::default(),
                submitting: busy(),
                submit_label: "Create",
                on_close: move |_| dialog.set(Dialog::Closed),
                on_submit: move |draft| save(None, draft),
            }
        },
        Dialog::Edit(record) => {
            let id = record.id().to_string();
            rsx! {
                FormDialog {
                    title: format!("Edit {}", record.label()),
                    fields: R::FIELDS,
                    initial: record.draft(),
                    submitting: busy(),
                    submit_label: "Save",
                    on_close: move |_| dialog.set(Dialog::Closed),
                    on_submit: move |draft| save(Some(id.clone()), draft),
                }
            }
        }
        Dialog::Delete(record) => {
            let subject = record.label();
            rsx! {
                ConfirmDialog {
                    title: format!("Delete {}", R::SINGULAR),
                    subject,
                    busy: busy(),
                    on_close: move |_| dialog.set(Dialog::Closed),
                    on_confirm: move |_| remove(record.clone()),
                }
            }
        }
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "{plural}" }
                    p { class: "page-subtitle", "{description}" }
                }
                if can_edit && R::CAN_CREATE {
                    div { class: "page-header-actions",
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| dialog.set(Dialog::Create),
                            "Add {singular}"
                        }
                    }
                }
            }

            FilterBar {
                fields: filter_fields,
                draft: filter_draft(),
                on_change: move |(name, value): (String, String)| filter_draft.write().set(&name, value),
                on_apply: move |_| {
                    let filters = filter_draft.read().values().clone();
                    query.write().apply_filters(&filters);
                },
                on_reset: move |_| {
                    filter_draft.set(Draft::default());
                    query.write().apply_filters(&BTreeMap::new());
                },
            }

            if let Some(message) = error {
                ErrorBanner { message, on_dismiss: move |_| list.write().dismiss_error() }
            }

            div { class: "card",
                div { class: "table-container",
                    table { class: if loading { "data-table is-loading" } else { "data-table" },
                        thead {
                            tr {
                                for column in R::COLUMNS {
                                    th { key: "{column}", "{column}" }
                                }
                                if can_edit {
                                    th { class: "actions-col", "Actions" }
                                }
                            }
                        }
                        tbody {
                            if is_empty {
                                tr {
                                    td { class: "empty-row", colspan: "{column_count}",
                                        if loading { "Loading..." } else { "No records found." }
                                    }
                                }
                            }
                            for row in rows {
                                {
                                    let id = row.id().to_string();
                                    let edit = row.clone();
                                    let delete = row.clone();
                                    rsx! {
                                        tr { key: "{id}",
                                            for (i, cell) in row.cells().into_iter().enumerate() {
                                                td { key: "{i}", "{cell}" }
                                            }
                                            if can_edit {
                                                td { class: "actions-col",
                                                    button {
                                                        class: "btn btn-secondary btn-sm",
                                                        onclick: move |_| dialog.set(Dialog::Edit(edit.clone())),
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "btn btn-danger btn-sm",
                                                        onclick: move |_| dialog.set(Dialog::Delete(delete.clone())),
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Pagination {
                    query: query(),
                    total_count,
                    disabled: loading,
                    on_page: move |page| query.write().go_to_page(page),
                    on_page_size: move |size| query.write().set_page_size(size),
                }
            }

            {dialog_view}
        }
    }
}
