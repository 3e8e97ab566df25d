use dioxus::prelude::*;

use crate::ui::theme;

/// Modal message that blocks the form until acknowledged.
#[component]
pub fn ValidationDialog(message: Signal<Option<String>>) -> Element {
    let mut message = message;
    let Some(text) = message() else {
        return rsx! { Fragment {} };
    };

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog",
                p { "{text}" }
                button {
                    class: theme::BTN_PRIMARY,
                    onclick: move |_| message.set(None),
                    "OK"
                }
            }
        }
    }
}
