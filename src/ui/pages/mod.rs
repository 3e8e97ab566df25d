pub mod shipment_form;

pub use shipment_form::ShipmentFormPage;
