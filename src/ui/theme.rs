//! Class helpers for consistent styling across the form.

pub const FORM_CARD: &str = "form-card";
pub const FIELD_ROW: &str = "field-row";
pub const FIELD_LABEL: &str = "field-label";
pub const BTN_PRIMARY: &str = "btn-primary";

pub fn select_class(disabled: bool) -> &'static str {
    if disabled {
        "field-select is-disabled"
    } else {
        "field-select"
    }
}

pub fn input_class(read_only: bool) -> &'static str {
    if read_only {
        "field-input is-readonly"
    } else {
        "field-input"
    }
}
