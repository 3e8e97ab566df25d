use dioxus::prelude::*;
use tracing::{info, warn};

use crate::{
    app::LoaderHandle,
    domain::CargoForm,
    ui::{
        components::{
            amount_input::AmountInput,
            catalog_select::{CatalogSelect, SelectOption},
            toast::{push_toast, ToastMessage},
            total_field::TotalField,
            validation_dialog::ValidationDialog,
        },
        theme,
    },
};

const SUBMIT_SUCCESS_MESSAGE: &str = "Data berhasil disubmit!";

#[component]
pub fn ShipmentFormPage() -> Element {
    let mut form = use_context::<Signal<CargoForm>>();
    let loader = use_context::<LoaderHandle>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut validation = use_signal(|| None::<String>);

    let state = form.with(|f| f.form().clone());
    let loading = form.with(|f| f.loading());
    let port_enabled = form.with(|f| f.port_select_enabled());
    let good_enabled = form.with(|f| f.good_select_enabled());
    let amounts_read_only = form.with(|f| f.amounts_read_only());

    let country_options: Vec<SelectOption> = form.with(|f| {
        f.countries()
            .iter()
            .map(|country| SelectOption::new(country.id.to_string(), country.label()))
            .collect()
    });
    let port_options: Vec<SelectOption> = form.with(|f| {
        f.ports()
            .iter()
            .map(|port| SelectOption::new(port.id.as_str(), port.name.clone()))
            .collect()
    });
    let good_options: Vec<SelectOption> = form.with(|f| {
        f.goods()
            .iter()
            .map(|good| SelectOption::new(good.id.to_string(), good.label()))
            .collect()
    });

    let port_placeholder = if state.country.is_empty() {
        "Pilih negara terlebih dahulu"
    } else {
        "Pilih Pelabuhan"
    };
    let good_placeholder = if state.port.is_empty() {
        "Pilih pelabuhan terlebih dahulu"
    } else {
        "Pilih Barang"
    };

    let on_country = {
        let loader = loader.clone();
        move |value: String| {
            if let Some(request) = form.with_mut(|f| f.select_country(&value)) {
                loader.spawn_load(form, request);
            }
        }
    };

    let on_port = {
        let loader = loader.clone();
        move |value: String| {
            if let Some(request) = form.with_mut(|f| f.select_port(&value)) {
                loader.spawn_load(form, request);
            }
        }
    };

    let on_good = move |value: String| form.with_mut(|f| f.select_good(&value));
    let on_discount = move |value: String| form.with_mut(|f| f.set_discount(&value));
    let on_price = move |value: String| form.with_mut(|f| f.set_price(&value));

    let on_submit = move |_: MouseEvent| match form.with(|f| f.submit()) {
        Ok(payload) => {
            match serde_json::to_string(&payload) {
                Ok(json) => info!(payload = %json, "shipment submitted"),
                Err(err) => warn!(error = %err, "failed to serialise submitted payload"),
            }
            push_toast(toasts, SUBMIT_SUCCESS_MESSAGE);
        }
        Err(err) => {
            warn!(error = ?err, "shipment rejected");
            validation.set(Some(err.to_string()));
        }
    };

    rsx! {
        div { class: theme::FORM_CARD,
            h2 { class: "form-title", "Form Pengiriman Barang" }

            CatalogSelect {
                label: "NEGARA".to_string(),
                value: state.country.clone(),
                options: country_options,
                placeholder: "Pilih Negara".to_string(),
                loading: loading.countries,
                loading_text: "Memuat negara...".to_string(),
                disabled: loading.countries,
                onchange: on_country,
            }

            CatalogSelect {
                label: "PELABUHAN".to_string(),
                value: state.port.clone(),
                options: port_options,
                placeholder: port_placeholder.to_string(),
                loading: loading.ports,
                loading_text: "Memuat pelabuhan...".to_string(),
                disabled: !port_enabled,
                onchange: on_port,
            }

            CatalogSelect {
                label: "BARANG".to_string(),
                value: state.good.clone(),
                options: good_options,
                placeholder: good_placeholder.to_string(),
                loading: loading.goods,
                loading_text: "Memuat barang...".to_string(),
                disabled: !good_enabled,
                onchange: on_good,
            }

            if !state.description.is_empty() {
                div { class: "description-box",
                    strong { "Deskripsi: " }
                    "{state.description}"
                }
            }

            AmountInput {
                label: "DISCOUNT".to_string(),
                value: state.discount.clone(),
                placeholder: "Discount otomatis terisi".to_string(),
                read_only: amounts_read_only,
                suffix: Some("%".to_string()),
                max: Some("100".to_string()),
                oninput: on_discount,
            }

            AmountInput {
                label: "HARGA".to_string(),
                value: state.price.clone(),
                placeholder: "Harga otomatis terisi".to_string(),
                read_only: amounts_read_only,
                prefix: Some("Rp".to_string()),
                oninput: on_price,
            }

            TotalField { value: state.total.clone() }

            button {
                class: theme::BTN_PRIMARY,
                onclick: on_submit,
                "Kirim Barang"
            }
        }
        ValidationDialog { message: validation }
    }
}
