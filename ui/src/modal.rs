use dioxus::prelude::*;

/// Overlay dialog. Clicking the backdrop or the close button calls
/// `on_close` unless `locked` is set.
#[component]
pub fn Modal(
    title: String,
    on_close: EventHandler<()>,
    #[props(default)] small: bool,
    #[props(default)] locked: bool,
    footer: Element,
    children: Element,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !locked { on_close.call(()) },
            div { class: if small { "modal modal-sm" } else { "modal" },
                role: "dialog",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                    if !locked {
                        button {
                            class: "modal-close",
                            r#type: "button",
                            onclick: move |_| on_close.call(()),
                            "×"
                        }
                    }
                }
                div { class: "modal-body", {children} }
                div { class: "modal-footer", {footer} }
            }
        }
    }
}

#[component]
pub fn ConfirmDialog(
    title: String,
    subject: String,
    busy: bool,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_close: EventHandler<()>,
    on_confirm: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            title,
            small: true,
            locked: busy,
            on_close,
            footer: rsx! {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Working..." } else { "{confirm_label}" }
                }
            },
            p { "Are you sure you want to delete " strong { "{subject}" } "?" }
            p { class: "text-muted", "This action cannot be undone." }
        }
    }
}
