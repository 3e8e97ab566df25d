use dioxus::prelude::*;

use crate::ui::theme;

/// Read-only display of the computed total.
#[component]
pub fn TotalField(value: String) -> Element {
    rsx! {
        div { class: theme::FIELD_ROW,
            label { class: theme::FIELD_LABEL, "TOTAL" }
            div { class: "input-wrapper",
                span { class: "input-prefix", "Rp" }
                input {
                    r#type: "text",
                    class: theme::input_class(true),
                    value: "{value}",
                    placeholder: "Total otomatis dihitung",
                    readonly: true,
                }
            }
            p { class: "helper-text",
                "Total = Harga - (Harga × Discount / 100), format: Rp. 1.000.000"
            }
        }
    }
}
