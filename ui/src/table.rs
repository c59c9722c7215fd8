use dioxus::prelude::*;
use types::listing::{ListQuery, PAGE_SIZES};

/// Footer below a table: range label, page size picker, and previous/next
/// controls. Page indexes are zero-based.
#[component]
pub fn Pagination(
    query: ListQuery,
    total_count: u64,
    #[props(default)] disabled: bool,
    on_page: EventHandler<usize>,
    on_page_size: EventHandler<usize>,
) -> Element {
    let pages = query.page_count(total_count);
    let current = query.page_index.min(pages - 1);
    let label = query.range_label(total_count);
    let page_number = current + 1;
    let page_size = query.page_size;

    rsx! {
        div { class: "pagination",
            span { class: "pagination-range text-muted", "{label}" }
            label { class: "pagination-size",
                "Rows per page"
                select {
                    class: "form-input",
                    disabled,
                    value: "{page_size}",
                    onchange: move |e| {
                        if let Ok(size) = e.value().parse::<usize>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in PAGE_SIZES {
                        option { key: "{size}", value: "{size}", selected: size == page_size, "{size}" }
                    }
                }
            }
            div { class: "pagination-controls",
                button {
                    class: "btn btn-secondary btn-sm",
                    r#type: "button",
                    disabled: disabled || current == 0,
                    onclick: move |_| on_page.call(current.saturating_sub(1)),
                    "Previous"
                }
                span { class: "pagination-page", "Page {page_number} of {pages}" }
                button {
                    class: "btn btn-secondary btn-sm",
                    r#type: "button",
                    disabled: disabled || current + 1 >= pages,
                    onclick: move |_| on_page.call(current + 1),
                    "Next"
                }
            }
        }
    }
}
