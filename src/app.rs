use dioxus::prelude::*;
use tracing::{debug, error, info};

use crate::{
    domain::{CargoForm, LoadRequest},
    infra::{
        api::CatalogClient,
        config::AppConfig,
        loader::{failure_outcome, CatalogLoader},
    },
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::ShipmentFormPage,
        shell::Shell,
    },
    util::assets,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Shipment {},
}

/// Shared handle to the catalog loader. Empty when the HTTP client could not
/// be built; every load then resolves to fallback data.
#[derive(Clone)]
pub struct LoaderHandle {
    loader: Option<CatalogLoader>,
}

impl LoaderHandle {
    fn from_config(config: &AppConfig) -> Self {
        match CatalogClient::new(config) {
            Ok(client) => {
                info!(base_url = %config.api_base_url, "catalog client ready");
                Self {
                    loader: Some(CatalogLoader::new(client)),
                }
            }
            Err(err) => {
                error!(error = %err, "failed to initialise catalog client");
                Self { loader: None }
            }
        }
    }

    /// Runs `request` in the background and commits the outcome to `form`.
    /// Outcomes for superseded requests are dropped by the form itself.
    pub fn spawn_load(&self, mut form: Signal<CargoForm>, request: LoadRequest) {
        let loader = self.loader.clone();
        spawn(async move {
            let outcome = match loader {
                Some(loader) => loader.load(&request.target).await,
                None => failure_outcome(&request.target, &"catalog client unavailable"),
            };
            debug!(
                level = ?request.level(),
                entries = outcome.catalog.len(),
                source = ?outcome.source,
                "load finished"
            );
            let applied = form.with_mut(|f| f.apply_load(&request, outcome));
            if !applied {
                debug!(
                    level = ?request.level(),
                    generation = request.generation,
                    "load result superseded"
                );
            }
        });
    }
}

#[component]
pub fn App() -> Element {
    let mut form = use_signal(CargoForm::new);
    use_context_provider(|| form);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let loader = use_hook(|| LoaderHandle::from_config(&AppConfig::from_env()));
    use_context_provider(|| loader.clone());

    // Countries are loaded once per session.
    use_hook(move || {
        let request = form.with_mut(|f| f.load_countries());
        loader.spawn_load(form, request);
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Shipment() -> Element {
    rsx! { Shell { ShipmentFormPage {} } }
}
