use dioxus::prelude::*;
use types::form::{Draft, FieldKind, FieldSpec};

use crate::Modal;

/// One labelled input for a [`FieldSpec`].
#[component]
pub fn FieldInput(
    spec: FieldSpec,
    value: String,
    on_input: EventHandler<String>,
    // Keeps ids unique when a field sits in a filter bar and a dialog at once.
    id_prefix: String,
    #[props(default)] disabled: bool,
    #[props(default = "Select...".to_string())] empty_option: String,
) -> Element {
    let id = format!("{id_prefix}-{}", spec.name);
    let marker = if spec.required { " *" } else { "" };

    let control = match spec.kind {
        FieldKind::Select(options) => rsx! {
            select {
                id: "{id}",
                class: "form-input",
                disabled,
                value: "{value}",
                onchange: move |e| on_input.call(e.value()),
                option { value: "", "{empty_option}" }
                for option in options.iter() {
                    option { key: "{option}", value: "{option}", selected: value == *option, "{option}" }
                }
            }
        },
        FieldKind::TextArea => rsx! {
            textarea {
                id: "{id}",
                class: "form-input",
                rows: "3",
                disabled,
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        },
        kind => rsx! {
            input {
                id: "{id}",
                class: "form-input",
                r#type: kind.input_type(),
                disabled,
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        },
    };

    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{id}", "{spec.label}{marker}" }
            {control}
        }
    }
}

/// Create/edit dialog. Holds its own copy of the draft; the submit button is
/// enabled only while every required field is filled in.
#[component]
pub fn FormDialog(
    title: String,
    fields: &'static [FieldSpec],
    initial: Draft,
    submitting: bool,
    submit_label: String,
    on_close: EventHandler<()>,
    on_submit: EventHandler<Draft>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let missing = draft.read().missing_required(fields).join(", ");
    let can_submit = missing.is_empty() && !submitting;

    rsx! {
        Modal {
            title,
            locked: submitting,
            on_close,
            footer: rsx! {
                if !missing.is_empty() {
                    span { class: "form-hint text-muted", "Required: {missing}" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !can_submit,
                    onclick: move |_| on_submit.call(draft.read().clone()),
                    if submitting { "Saving..." } else { "{submit_label}" }
                }
            },
            for field in fields.iter() {
                FieldInput {
                    key: "{field.name}",
                    spec: *field,
                    value: draft.read().get(field.name).to_string(),
                    id_prefix: "dialog",
                    disabled: submitting,
                    on_input: move |value: String| draft.write().set(field.name, value),
                }
            }
        }
    }
}

/// Filter inputs above a table. Edits stay local to the draft until
/// **Apply** is pressed.
#[component]
pub fn FilterBar(
    fields: Vec<FieldSpec>,
    draft: Draft,
    on_change: EventHandler<(String, String)>,
    on_apply: EventHandler<()>,
    on_reset: EventHandler<()>,
) -> Element {
    if fields.is_empty() {
        return rsx! {};
    }

    rsx! {
        form { class: "filter-bar",
            onsubmit: move |e| {
                e.prevent_default();
                on_apply.call(());
            },
            for field in fields.into_iter() {
                FieldInput {
                    key: "{field.name}",
                    spec: field.relaxed(),
                    value: draft.get(field.name).to_string(),
                    id_prefix: "filter",
                    empty_option: "Any",
                    on_input: move |value: String| on_change.call((field.name.to_string(), value)),
                }
            }
            div { class: "filter-actions",
                button { class: "btn btn-primary", r#type: "submit", "Apply" }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_reset.call(()),
                    "Reset"
                }
            }
        }
    }
}
