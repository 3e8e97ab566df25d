//! Dependent-selection state for the shipment form.
//!
//! [`CargoForm`] is the single owner of the form fields, the three candidate
//! lists and the loading flags. The UI mutates it only through the named
//! operations below; every selection change goes through the cascade table in
//! [`Level::cascade`], so the reset rules live in one place.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::entities::{
    parse_country_id, parse_good_id, Country, CountryId, Good, GoodId, Port, PortId,
};
use super::pricing::{compute_total_from_fields, format_total, parse_number};

/// One level of the country → port → good cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Countries,
    Ports,
    Goods,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Countries, Level::Ports, Level::Goods];

    fn index(self) -> usize {
        match self {
            Level::Countries => 0,
            Level::Ports => 1,
            Level::Goods => 2,
        }
    }

    /// Human-readable name, used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Level::Countries => "countries",
            Level::Ports => "ports",
            Level::Goods => "goods",
        }
    }

    /// What a selection change at this level invalidates.
    pub fn cascade(self) -> Cascade {
        match self {
            Level::Countries => Cascade {
                fields: &[
                    Field::Port,
                    Field::Good,
                    Field::Description,
                    Field::Discount,
                    Field::Price,
                    Field::Total,
                ],
                lists: &[Level::Ports, Level::Goods],
            },
            Level::Ports => Cascade {
                fields: &[
                    Field::Good,
                    Field::Description,
                    Field::Discount,
                    Field::Price,
                    Field::Total,
                ],
                lists: &[Level::Goods],
            },
            Level::Goods => Cascade {
                fields: &[Field::Description, Field::Discount, Field::Price, Field::Total],
                lists: &[],
            },
        }
    }
}

/// A single bindable field of [`FormState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Country,
    Port,
    Good,
    Description,
    Discount,
    Price,
    Total,
}

/// Fields and candidate lists cleared by a selection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cascade {
    pub fields: &'static [Field],
    pub lists: &'static [Level],
}

/// The record the form inputs bind to. All values are kept as the strings
/// the inputs display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub country: String,
    pub port: String,
    pub good: String,
    pub description: String,
    pub discount: String,
    pub price: String,
    /// Formatted (`id-ID`) total. Display only.
    pub total: String,
}

impl FormState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Country => &self.country,
            Field::Port => &self.port,
            Field::Good => &self.good,
            Field::Description => &self.description,
            Field::Discount => &self.discount,
            Field::Price => &self.price,
            Field::Total => &self.total,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Country => &mut self.country,
            Field::Port => &mut self.port,
            Field::Good => &mut self.good,
            Field::Description => &mut self.description,
            Field::Discount => &mut self.discount,
            Field::Price => &mut self.price,
            Field::Total => &mut self.total,
        }
    }

    fn recompute_total(&mut self) {
        self.total = format_total(compute_total_from_fields(&self.price, &self.discount));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub countries: bool,
    pub ports: bool,
    pub goods: bool,
}

impl LoadingFlags {
    pub fn get(&self, level: Level) -> bool {
        match level {
            Level::Countries => self.countries,
            Level::Ports => self.ports,
            Level::Goods => self.goods,
        }
    }

    fn set(&mut self, level: Level, value: bool) {
        match level {
            Level::Countries => self.countries = value,
            Level::Ports => self.ports = value,
            Level::Goods => self.goods = value,
        }
    }
}

/// Which list to fetch and the parent key it is filtered by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadTarget {
    Countries,
    Ports(CountryId),
    Goods(PortId),
}

impl LoadTarget {
    pub fn level(&self) -> Level {
        match self {
            LoadTarget::Countries => Level::Countries,
            LoadTarget::Ports(_) => Level::Ports,
            LoadTarget::Goods(_) => Level::Goods,
        }
    }
}

/// A fetch issued by the form, stamped with the generation that was current
/// for its level when it was issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub target: LoadTarget,
    pub generation: u64,
}

impl LoadRequest {
    pub fn level(&self) -> Level {
        self.target.level()
    }
}

/// Candidate list produced by the loader for one level.
#[derive(Clone, Debug, PartialEq)]
pub enum Catalog {
    Countries(Vec<Country>),
    Ports(Vec<Port>),
    Goods(Vec<Good>),
}

impl Catalog {
    pub fn level(&self) -> Level {
        match self {
            Catalog::Countries(_) => Level::Countries,
            Catalog::Ports(_) => Level::Ports,
            Catalog::Goods(_) => Level::Goods,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Catalog::Countries(items) => items.len(),
            Catalog::Ports(items) => items.len(),
            Catalog::Goods(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Remote,
    /// Remote call succeeded but returned nothing usable.
    EmptyFallback,
    /// Remote call failed.
    FailureFallback,
}

/// Result of one loader run, ready to be committed with
/// [`CargoForm::apply_load`].
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub source: CatalogSource,
    /// User-visible warning; only set on the failure path.
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn remote(catalog: Catalog) -> Self {
        Self {
            catalog,
            source: CatalogSource::Remote,
            error: None,
        }
    }

    pub fn empty_fallback(catalog: Catalog) -> Self {
        Self {
            catalog,
            source: CatalogSource::EmptyFallback,
            error: None,
        }
    }

    pub fn failed(catalog: Catalog, message: impl Into<String>) -> Self {
        Self {
            catalog,
            source: CatalogSource::FailureFallback,
            error: Some(message.into()),
        }
    }
}

pub const MISSING_FIELDS_MESSAGE: &str = "Mohon lengkapi semua field yang diperlukan!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Mohon lengkapi semua field yang diperlukan!")]
    MissingFields(Vec<Field>),
    #[error("invalid {field:?} selection: {value}")]
    InvalidSelection { field: Field, value: String },
}

/// Payload emitted on a successful submit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmitPayload {
    pub negara: CountryId,
    pub pelabuhan: String,
    pub barang: GoodId,
    pub description: String,
    pub discount: f64,
    pub harga: f64,
    pub total: f64,
}

#[derive(Clone, Debug, Default)]
pub struct CargoForm {
    form: FormState,
    countries: Vec<Country>,
    ports: Vec<Port>,
    goods: Vec<Good>,
    loading: LoadingFlags,
    error: Option<String>,
    generations: [u64; 3],
}

impl CargoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn goods(&self) -> &[Good] {
        &self.goods
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn port_select_enabled(&self) -> bool {
        !self.form.country.is_empty() && !self.loading.ports
    }

    pub fn good_select_enabled(&self) -> bool {
        !self.form.port.is_empty() && !self.loading.goods
    }

    /// Price and discount become read-only once a good is chosen.
    pub fn amounts_read_only(&self) -> bool {
        !self.form.good.is_empty()
    }

    /// Starts the session-initial countries fetch. Clears the error slot.
    pub fn load_countries(&mut self) -> LoadRequest {
        self.error = None;
        self.begin_load(LoadTarget::Countries)
    }

    /// Marks a level as loading and returns the tagged request. Any earlier
    /// request for the same level becomes stale.
    pub fn begin_load(&mut self, target: LoadTarget) -> LoadRequest {
        let level = target.level();
        let generation = self.bump_generation(level);
        self.loading.set(level, true);
        if level != Level::Countries {
            self.clear_list(level);
        }
        debug!(level = level.name(), generation, "load started");
        LoadRequest { target, generation }
    }

    /// Commits a loader outcome. Returns `false` when the outcome was
    /// discarded because a newer request superseded it.
    pub fn apply_load(&mut self, request: &LoadRequest, outcome: LoadOutcome) -> bool {
        let level = request.level();
        if self.generations[level.index()] != request.generation {
            debug!(
                level = level.name(),
                generation = request.generation,
                current = self.generations[level.index()],
                "discarding stale load result"
            );
            return false;
        }
        if outcome.catalog.level() != level {
            warn!(
                expected = level.name(),
                got = outcome.catalog.level().name(),
                "load result does not match request level"
            );
            return false;
        }

        match outcome.catalog {
            Catalog::Countries(items) => self.countries = items,
            Catalog::Ports(items) => self.ports = items,
            Catalog::Goods(items) => self.goods = items,
        }
        if let Some(message) = outcome.error {
            self.error = Some(message);
        }
        self.loading.set(level, false);
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Selects a country. Returns the ports fetch to run when the value
    /// resolves to a known country.
    pub fn select_country(&mut self, value: &str) -> Option<LoadRequest> {
        self.form.country = value.to_string();
        self.apply_cascade(Level::Countries);

        let country_id = parse_country_id(value)?;
        let known = self.countries.iter().any(|country| country.id == country_id);
        known.then(|| self.begin_load(LoadTarget::Ports(country_id)))
    }

    /// Selects a port. Returns the goods fetch to run when the value
    /// resolves to a port in the current list.
    pub fn select_port(&mut self, value: &str) -> Option<LoadRequest> {
        self.form.port = value.to_string();
        self.apply_cascade(Level::Ports);

        let wanted = PortId::new(value);
        if wanted.is_blank() {
            return None;
        }
        let port_id = self
            .ports
            .iter()
            .find(|port| port.id == wanted)
            .map(|port| port.id.clone())?;
        Some(self.begin_load(LoadTarget::Goods(port_id)))
    }

    /// Selects a good and auto-fills description, discount and price.
    pub fn select_good(&mut self, value: &str) {
        self.form.good = value.to_string();
        self.apply_cascade(Level::Goods);

        let Some(good) = parse_good_id(value)
            .and_then(|id| self.goods.iter().find(|good| good.id == id))
            .cloned()
        else {
            return;
        };

        self.form.description = good.display_description();
        self.form.discount = good.display_discount();
        self.form.price = good.display_price();
        self.form.recompute_total();
    }

    pub fn set_price(&mut self, value: &str) {
        if self.amounts_read_only() {
            return;
        }
        self.form.price = value.to_string();
        self.form.recompute_total();
    }

    pub fn set_discount(&mut self, value: &str) {
        if self.amounts_read_only() {
            return;
        }
        self.form.discount = value.to_string();
        self.form.recompute_total();
    }

    /// Validates the form and builds the submission payload. Never mutates
    /// state.
    pub fn submit(&self) -> Result<SubmitPayload, SubmitError> {
        let required = [Field::Country, Field::Port, Field::Good, Field::Price];
        let missing: Vec<Field> = required
            .into_iter()
            .filter(|field| self.form.field(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(SubmitError::MissingFields(missing));
        }

        let negara = parse_country_id(&self.form.country).ok_or_else(|| {
            SubmitError::InvalidSelection {
                field: Field::Country,
                value: self.form.country.clone(),
            }
        })?;
        let barang =
            parse_good_id(&self.form.good).ok_or_else(|| SubmitError::InvalidSelection {
                field: Field::Good,
                value: self.form.good.clone(),
            })?;

        Ok(SubmitPayload {
            negara,
            pelabuhan: self.form.port.clone(),
            barang,
            description: self.form.description.clone(),
            discount: parse_number(&self.form.discount),
            harga: parse_number(&self.form.price),
            total: compute_total_from_fields(&self.form.price, &self.form.discount),
        })
    }

    fn apply_cascade(&mut self, level: Level) {
        let cascade = level.cascade();
        for field in cascade.fields {
            self.form.field_mut(*field).clear();
        }
        for list in cascade.lists {
            self.clear_list(*list);
            // Whatever was in flight for this list is now stale.
            self.bump_generation(*list);
            self.loading.set(*list, false);
        }
    }

    fn clear_list(&mut self, level: Level) {
        match level {
            Level::Countries => self.countries.clear(),
            Level::Ports => self.ports.clear(),
            Level::Goods => self.goods.clear(),
        }
    }

    fn bump_generation(&mut self, level: Level) -> u64 {
        let slot = &mut self.generations[level.index()];
        *slot += 1;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<Country> {
        vec![
            Country::new(1, "Indonesia", "ID"),
            Country::new(3, "Singapore", "SG"),
        ]
    }

    fn ports() -> Vec<Port> {
        vec![
            Port {
                id: PortId::new("1"),
                name: "Tanjung Perak".to_string(),
                country_id: Some("1".to_string()),
            },
            Port {
                id: PortId::new("2"),
                name: "Tanjung Priok".to_string(),
                country_id: Some("1".to_string()),
            },
        ]
    }

    fn goods() -> Vec<Good> {
        vec![
            Good {
                id: 1,
                name: "BAJU".to_string(),
                port_id: Some("1".to_string()),
                price: 152000.0,
                description: Some("Merk Camp Wolver bahan tebal casual".to_string()),
                discount_percent: Some(5.0),
            },
            Good {
                id: 2,
                name: "SEPATU".to_string(),
                port_id: Some("1".to_string()),
                price: 300000.0,
                description: None,
                discount_percent: None,
            },
        ]
    }

    /// A form with countries loaded, a country and port chosen and goods
    /// loaded.
    fn ready_form() -> CargoForm {
        let mut form = CargoForm::new();
        let request = form.load_countries();
        assert!(form.apply_load(&request, LoadOutcome::remote(Catalog::Countries(countries()))));
        let request = form.select_country("1").expect("ports request");
        assert!(form.apply_load(&request, LoadOutcome::remote(Catalog::Ports(ports()))));
        let request = form.select_port("1").expect("goods request");
        assert!(form.apply_load(&request, LoadOutcome::remote(Catalog::Goods(goods()))));
        form
    }

    #[test]
    fn cascade_table_is_strictly_downward() {
        for level in Level::ALL {
            let cascade = level.cascade();
            assert!(!cascade.lists.contains(&level));
            assert!(!cascade.fields.contains(&Field::Country));
            assert!(cascade.fields.contains(&Field::Total));
        }
    }

    #[test]
    fn changing_country_resets_everything_below() {
        let mut form = ready_form();
        form.select_good("1");
        assert_eq!(form.form().total, "144.400");

        let request = form.select_country("3").expect("ports request");
        let state = form.form();
        assert_eq!(state.country, "3");
        assert!(state.port.is_empty());
        assert!(state.good.is_empty());
        assert!(state.description.is_empty());
        assert!(state.discount.is_empty());
        assert!(state.price.is_empty());
        assert!(state.total.is_empty());
        assert!(form.ports().is_empty());
        assert!(form.goods().is_empty());
        assert!(form.loading().ports);
        assert_eq!(request.target, LoadTarget::Ports(3));
    }

    #[test]
    fn unknown_or_blank_country_only_clears() {
        let mut form = ready_form();
        assert!(form.select_country("42").is_none());
        assert!(form.select_country("abc").is_none());
        assert!(form.select_country("").is_none());
        assert!(form.ports().is_empty());
        assert!(!form.loading().ports);
        assert!(!form.port_select_enabled());
    }

    #[test]
    fn changing_port_resets_goods_and_amounts() {
        let mut form = ready_form();
        form.select_good("2");
        let request = form.select_port("2").expect("goods request");
        assert_eq!(request.target, LoadTarget::Goods(PortId::new("2")));
        assert_eq!(form.form().country, "1");
        assert_eq!(form.form().port, "2");
        assert!(form.form().good.is_empty());
        assert!(form.form().price.is_empty());
        assert!(form.goods().is_empty());
        assert!(form.loading().goods);
        assert!(!form.good_select_enabled());
    }

    #[test]
    fn port_values_match_after_trimming() {
        let mut form = ready_form();
        assert!(form.select_port(" 2 ").is_some());
        assert!(form.select_port("9").is_none());
    }

    #[test]
    fn selecting_good_autofills_fields() {
        let mut form = ready_form();
        form.select_good("1");
        let state = form.form();
        assert_eq!(state.description, "Merk Camp Wolver bahan tebal casual");
        assert_eq!(state.discount, "5");
        assert_eq!(state.price, "152000");
        assert_eq!(state.total, "144.400");
        assert!(form.amounts_read_only());
    }

    #[test]
    fn good_without_discount_fills_zero() {
        let mut form = ready_form();
        form.select_good("2");
        assert_eq!(form.form().discount, "0");
        assert_eq!(form.form().description, "SEPATU");
        assert_eq!(form.form().total, "300.000");
    }

    #[test]
    fn unresolved_good_clears_amounts() {
        let mut form = ready_form();
        form.select_good("1");
        form.select_good("");
        let state = form.form();
        assert!(state.good.is_empty());
        assert!(state.description.is_empty());
        assert!(state.discount.is_empty());
        assert!(state.price.is_empty());
        assert!(state.total.is_empty());
    }

    #[test]
    fn manual_amounts_recompute_total() {
        let mut form = ready_form();
        form.set_price("1000000");
        form.set_discount("10");
        assert_eq!(form.form().total, "900.000");
        form.set_discount("abc");
        assert_eq!(form.form().total, "1.000.000");
    }

    #[test]
    fn manual_amounts_are_locked_while_good_selected() {
        let mut form = ready_form();
        form.select_good("1");
        form.set_price("1");
        assert_eq!(form.form().price, "152000");
    }

    #[test]
    fn stale_ports_result_is_discarded() {
        let mut form = ready_form();
        let first = form.select_country("1").expect("first request");
        let second = form.select_country("3").expect("second request");

        let late = LoadOutcome::remote(Catalog::Ports(ports()));
        assert!(!form.apply_load(&first, late));
        assert!(form.ports().is_empty());
        assert!(form.loading().ports);

        let singapore = vec![Port {
            id: PortId::new("7"),
            name: "Keppel".to_string(),
            country_id: Some("3".to_string()),
        }];
        assert!(form.apply_load(&second, LoadOutcome::remote(Catalog::Ports(singapore))));
        assert_eq!(form.ports().len(), 1);
        assert!(!form.loading().ports);
    }

    #[test]
    fn goods_in_flight_become_stale_when_country_changes() {
        let mut form = ready_form();
        let goods_request = form.select_port("2").expect("goods request");
        form.select_country("3");
        assert!(!form.loading().goods);
        assert!(!form.apply_load(&goods_request, LoadOutcome::remote(Catalog::Goods(goods()))));
        assert!(form.goods().is_empty());
    }

    #[test]
    fn failed_load_sets_error_and_clears_flag() {
        let mut form = ready_form();
        let request = form.select_country("3").expect("ports request");
        let outcome = LoadOutcome::failed(Catalog::Ports(ports()), "Gagal memuat data pelabuhan");
        assert!(form.apply_load(&request, outcome));
        assert_eq!(form.error(), Some("Gagal memuat data pelabuhan"));
        assert!(!form.loading().ports);
        assert!(!form.ports().is_empty());

        form.dismiss_error();
        assert!(form.error().is_none());
    }

    #[test]
    fn countries_load_clears_previous_error() {
        let mut form = ready_form();
        let request = form.select_country("3").expect("ports request");
        let outcome = LoadOutcome::failed(Catalog::Ports(ports()), "Gagal memuat data pelabuhan");
        assert!(form.apply_load(&request, outcome));
        assert!(form.error().is_some());

        let request = form.load_countries();
        assert!(form.error().is_none());
        assert!(form.loading().countries);
        assert!(form.apply_load(&request, LoadOutcome::remote(Catalog::Countries(countries()))));
        assert!(form.error().is_none());
    }

    #[test]
    fn mismatched_catalog_level_is_ignored() {
        let mut form = CargoForm::new();
        let request = form.load_countries();
        assert!(!form.apply_load(&request, LoadOutcome::remote(Catalog::Goods(goods()))));
        assert!(form.loading().countries);
    }

    #[test]
    fn submit_requires_port() {
        let mut form = ready_form();
        form.select_port("");
        let before = form.form().clone();
        let result = form.submit();
        assert_eq!(
            result,
            Err(SubmitError::MissingFields(vec![
                Field::Port,
                Field::Good,
                Field::Price
            ]))
        );
        assert_eq!(form.form(), &before);
    }

    #[test]
    fn submit_builds_payload() {
        let mut form = ready_form();
        form.select_good("1");
        let payload = form.submit().expect("valid form");
        assert_eq!(payload.negara, 1);
        assert_eq!(payload.pelabuhan, "1");
        assert_eq!(payload.barang, 1);
        assert_eq!(payload.discount, 5.0);
        assert_eq!(payload.harga, 152000.0);
        assert_eq!(payload.total, 144400.0);
    }

    #[test]
    fn missing_fields_message_is_user_facing() {
        let err = CargoForm::new().submit().unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
    }
}
