use dioxus::prelude::*;

use crate::ui::theme;

/// Numeric input with an optional `Rp` prefix or `%` suffix.
#[component]
pub fn AmountInput(
    label: String,
    value: String,
    placeholder: String,
    read_only: bool,
    prefix: Option<String>,
    suffix: Option<String>,
    max: Option<String>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: theme::FIELD_ROW,
            label { class: theme::FIELD_LABEL, "{label}" }
            div { class: "input-wrapper",
                if let Some(prefix) = prefix {
                    span { class: "input-prefix", "{prefix}" }
                }
                input {
                    r#type: "number",
                    class: theme::input_class(read_only),
                    value: "{value}",
                    placeholder: "{placeholder}",
                    min: "0",
                    max: max,
                    step: "0.01",
                    readonly: read_only,
                    oninput: move |evt: FormEvent| oninput.call(evt.value()),
                }
                if let Some(suffix) = suffix {
                    span { class: "input-suffix", "{suffix}" }
                }
            }
        }
    }
}
