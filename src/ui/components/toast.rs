use std::time::Duration;

use dioxus::prelude::*;
use tracing::debug;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub text: String,
}

impl ToastMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            text: text.into(),
        }
    }
}

/// Appends a confirmation toast, dropping the oldest once the stack is full.
pub fn push_toast(mut toasts: Signal<Vec<ToastMessage>>, message: impl Into<String>) {
    let toast = ToastMessage::new(message);
    debug!(id = %toast.id, text = %toast.text, "toast");
    toasts.with_mut(|entries| push_bounded(entries, toast));
}

fn push_bounded(entries: &mut Vec<ToastMessage>, toast: ToastMessage) {
    if entries.len() >= MAX_TOASTS {
        entries.remove(0);
    }
    entries.push(toast);
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let entries = toasts();

    if entries.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "toast-stack",
            ul {
                for toast in entries {
                    ToastCard { key: "{toast.id}", toast, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(toast: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let mut toasts = toasts;
    let toast_id = toast.id.clone();
    let _auto_dismiss = use_future(move || {
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|item| item.id != id));
        }
    });

    let target = toast.id.clone();
    rsx! {
        li { class: "toast toast-success",
            span { "✅" }
            p { "{toast.text}" }
            button {
                class: "toast-dismiss",
                onclick: move |_| {
                    let target = target.clone();
                    toasts.with_mut(|items| items.retain(|item| item.id != target));
                },
                "Tutup"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_stack_is_bounded() {
        let mut entries = Vec::new();
        for idx in 0..(MAX_TOASTS + 2) {
            push_bounded(&mut entries, ToastMessage::new(format!("t{idx}")));
        }
        assert_eq!(entries.len(), MAX_TOASTS);
        assert_eq!(entries[0].text, "t2");
    }

    #[test]
    fn toast_ids_are_unique() {
        let a = ToastMessage::new("a");
        let b = ToastMessage::new("b");
        assert_ne!(a.id, b.id);
    }
}
