//! Domain logic for the shipment form lives here.

pub mod entities;
pub mod form_state;
pub mod pricing;

#[allow(unused_imports)]
pub use entities::{Country, CountryId, Good, GoodId, Port, PortId};
#[allow(unused_imports)]
pub use form_state::{
    CargoForm, Catalog, CatalogSource, Field, FormState, Level, LoadOutcome, LoadRequest,
    LoadTarget, LoadingFlags, SubmitError, SubmitPayload,
};
#[allow(unused_imports)]
pub use pricing::{compute_total, format_total, parse_number};
