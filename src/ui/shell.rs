use dioxus::prelude::*;

use crate::ui::components::error_banner::ErrorBanner;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let version = version_label();

    rsx! {
        ErrorBanner {}
        header { class: "shell-header",
            h1 { class: "shell-title", "{APP_NAME}" }
            p { class: "shell-subtitle", "Sistem Manajemen Cargo & Logistics" }
        }
        main { class: "shell-main", {children} }
        footer { class: "shell-footer", "{APP_NAME} {version}" }
    }
}
