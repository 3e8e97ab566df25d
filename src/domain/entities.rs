use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for countries returned by the catalog API.
pub type CountryId = u32;

/// Identifier for goods returned by the catalog API.
pub type GoodId = u32;

/// Port identifiers arrive as strings or numbers; both normalise to the
/// decimal string form so select values compare without coercion surprises.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(String);

impl PortId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub code: String,
}

impl Country {
    pub fn new(id: CountryId, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id != 0 && !self.name.trim().is_empty() && !self.code.trim().is_empty()
    }

    /// Option label as shown in the country select, e.g. `ID - Indonesia`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    /// Owning country as reported by the API (string form).
    pub country_id: Option<String>,
}

impl Port {
    pub fn is_valid(&self) -> bool {
        !self.id.is_blank() && !self.name.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub id: GoodId,
    pub name: String,
    pub port_id: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub discount_percent: Option<f64>,
}

impl Good {
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.price > 0.0
    }

    /// Option label as shown in the goods select, e.g. `1 - BAJU`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name.trim())
    }

    /// Description to auto-fill; falls back to the good's name.
    pub fn display_description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.name.clone())
    }

    /// Discount to auto-fill. A missing or zero discount becomes `"0"`.
    pub fn display_discount(&self) -> String {
        match self.discount_percent {
            Some(value) if value != 0.0 && value.is_finite() => format_plain(value),
            _ => "0".to_string(),
        }
    }

    pub fn display_price(&self) -> String {
        format_plain(self.price)
    }
}

/// Parses a country select value. Country ids are integers.
pub fn parse_country_id(raw: &str) -> Option<CountryId> {
    raw.trim().parse().ok()
}

/// Parses a goods select value. Goods ids are integers.
pub fn parse_good_id(raw: &str) -> Option<GoodId> {
    raw.trim().parse().ok()
}

/// Stringifies a number the way an input field shows it: integers without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
