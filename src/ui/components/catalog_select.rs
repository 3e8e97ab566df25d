use dioxus::prelude::*;

use crate::ui::theme;

/// One `<option>` of a catalog select.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Select bound to one level of the cascade. While the level is loading the
/// control is replaced by a spinner so no stale option can be picked.
#[component]
pub fn CatalogSelect(
    label: String,
    value: String,
    options: Vec<SelectOption>,
    placeholder: String,
    loading: bool,
    loading_text: String,
    disabled: bool,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: theme::FIELD_ROW,
            label { class: theme::FIELD_LABEL, "{label}" }
            if loading {
                div { class: "field-loading",
                    div { class: "spinner" }
                    span { "{loading_text}" }
                }
            } else {
                select {
                    class: theme::select_class(disabled),
                    value: "{value}",
                    disabled: disabled,
                    required: true,
                    onchange: move |evt: FormEvent| onchange.call(evt.value()),
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                    for opt in options {
                        option {
                            key: "{opt.value}",
                            value: "{opt.value}",
                            selected: opt.value == value,
                            "{opt.label}"
                        }
                    }
                }
            }
        }
    }
}
