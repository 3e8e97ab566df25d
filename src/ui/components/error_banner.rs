use dioxus::prelude::*;

use crate::domain::CargoForm;

/// Dismissible banner for the shared load-error slot.
#[component]
pub fn ErrorBanner() -> Element {
    let mut form = use_context::<Signal<CargoForm>>();
    let Some(message) = form.with(|f| f.error().map(str::to_string)) else {
        return rsx! { Fragment {} };
    };

    rsx! {
        div { class: "error-banner",
            button {
                class: "error-banner-close",
                onclick: move |_| form.with_mut(|f| f.dismiss_error()),
                "×"
            }
            "{message}"
        }
    }
}
