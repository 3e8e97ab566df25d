//! Remote data loader: fetch a level's list, keep the valid entries and fall
//! back to static data on failure.

use std::fmt;

use tracing::{info, warn};

use crate::domain::{Catalog, Country, CountryId, Good, LoadOutcome, LoadTarget, Port, PortId};
use crate::infra::api::{CatalogClient, Entries};
use crate::infra::fallback;

pub const GOODS_FAILURE_MESSAGE: &str = "Gagal memuat data barang";
pub const PORTS_FAILURE_MESSAGE: &str = "Gagal memuat data pelabuhan";

#[derive(Clone)]
pub struct CatalogLoader {
    client: CatalogClient,
}

impl CatalogLoader {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Runs the fetch described by `target`. Never fails: errors become a
    /// fallback catalog plus a user-facing message.
    pub async fn load(&self, target: &LoadTarget) -> LoadOutcome {
        match target {
            LoadTarget::Countries => self.load_countries().await,
            LoadTarget::Ports(country_id) => self.load_ports(*country_id).await,
            LoadTarget::Goods(port_id) => self.load_goods(port_id).await,
        }
    }

    pub async fn load_countries(&self) -> LoadOutcome {
        match self.client.get_countries().await {
            Ok(entries) => {
                let valid = keep_valid(entries, Country::is_valid, "countries");
                if valid.is_empty() {
                    warn!("no valid countries in response, using fallback data");
                    LoadOutcome::empty_fallback(Catalog::Countries(
                        fallback::empty_result_countries(),
                    ))
                } else {
                    LoadOutcome::remote(Catalog::Countries(valid))
                }
            }
            Err(err) => failure_outcome(&LoadTarget::Countries, &err),
        }
    }

    /// An empty but well-formed response is committed as-is: a country may
    /// legitimately have no ports.
    pub async fn load_ports(&self, country_id: CountryId) -> LoadOutcome {
        match self.client.get_ports(country_id).await {
            Ok(entries) => {
                LoadOutcome::remote(Catalog::Ports(keep_valid(entries, Port::is_valid, "ports")))
            }
            Err(err) => failure_outcome(&LoadTarget::Ports(country_id), &err),
        }
    }

    pub async fn load_goods(&self, port_id: &PortId) -> LoadOutcome {
        match self.client.get_goods(port_id).await {
            Ok(entries) => {
                LoadOutcome::remote(Catalog::Goods(keep_valid(entries, Good::is_valid, "goods")))
            }
            Err(err) => failure_outcome(&LoadTarget::Goods(port_id.clone()), &err),
        }
    }
}

/// Fallback catalog and banner message for a failed fetch. Also used when no
/// client could be built at all.
pub fn failure_outcome(target: &LoadTarget, cause: &dyn fmt::Display) -> LoadOutcome {
    warn!(
        catalog = target.level().name(),
        error = %cause,
        "catalog load failed, using fallback data"
    );
    match target {
        LoadTarget::Countries => LoadOutcome::failed(
            Catalog::Countries(fallback::countries()),
            format!("Gagal memuat data negara: {cause}. Menggunakan data fallback."),
        ),
        LoadTarget::Ports(country_id) => LoadOutcome::failed(
            Catalog::Ports(fallback::ports(*country_id)),
            PORTS_FAILURE_MESSAGE,
        ),
        LoadTarget::Goods(port_id) => LoadOutcome::failed(
            Catalog::Goods(fallback::goods(port_id)),
            GOODS_FAILURE_MESSAGE,
        ),
    }
}

fn keep_valid<T>(entries: Entries<T>, is_valid: impl Fn(&T) -> bool, level: &str) -> Vec<T> {
    let received = entries.items.len() + entries.undecodable;
    let valid: Vec<T> = entries
        .items
        .into_iter()
        .filter(|item| is_valid(item))
        .collect();
    info!(
        catalog = level,
        received,
        valid = valid.len(),
        dropped = received - valid.len(),
        "loaded catalog entries"
    );
    valid
}
