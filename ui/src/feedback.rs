use dioxus::prelude::*;

#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "loading", "{label}" }
    }
}

/// Inline error shown above the content it concerns.
#[component]
pub fn ErrorBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "error-banner", role: "alert",
            div { class: "error-banner-content",
                div { class: "error-banner-header",
                    span { class: "error-banner-message", "{message}" }
                    if let Some(on_dismiss) = on_dismiss {
                        div { class: "error-banner-actions",
                            button {
                                class: "error-banner-close",
                                r#type: "button",
                                onclick: move |_| on_dismiss.call(()),
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
