use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use gloo_timers::future::sleep;

/// At most this many notifications are shown; older ones drop off.
const MAX_TOASTS: usize = 4;

/// How long a notification stays up unless dismissed sooner.
const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message });
        let overflow = self.items.len().saturating_sub(MAX_TOASTS);
        self.items.drain(..overflow);
        id
    }

    fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Transient notifications. Use `use_toasts()` to access.
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    fn push(&mut self, kind: ToastKind, message: String) {
        let id = self.queue.write().push(kind, message);

        // Outlives the caller's scope, which may be gone by the time it fires.
        let mut toasts = *self;
        spawn_forever(async move {
            sleep(TOAST_LIFETIME).await;
            toasts.dismiss(id);
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&mut self, id: u64) {
        self.queue.write().dismiss(id);
    }
}

pub fn use_toast_provider() -> Toasts {
    use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::default()),
    })
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_toasts();
    let items = toasts.queue.read().items.clone();

    rsx! {
        div { class: "toast-stack", aria_live: "polite",
            for toast in items {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    },
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queue: &ToastQueue) -> Vec<u64> {
        queue.items.iter().map(|t| t.id).collect()
    }

    #[test]
    fn expiry_removes_only_its_own_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Error, "save failed".into());
        let second = queue.push(ToastKind::Success, "Brand created".into());

        queue.dismiss(first);
        assert_eq!(ids(&queue), [second]);

        // A timer firing after the toast was closed by hand is harmless.
        queue.dismiss(first);
        assert_eq!(ids(&queue), [second]);
    }

    #[test]
    fn oldest_toasts_drop_off() {
        let mut queue = ToastQueue::default();
        for i in 0..6 {
            queue.push(ToastKind::Success, format!("toast {i}"));
        }
        assert_eq!(ids(&queue), [2, 3, 4, 5]);
    }
}
