pub mod amount_input;
pub mod catalog_select;
pub mod error_banner;
pub mod toast;
pub mod total_field;
pub mod validation_dialog;
