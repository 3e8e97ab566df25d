//! Static catalogs used when the API is unreachable or returns nothing
//! usable, so the cascade stays navigable.

use crate::domain::{Country, CountryId, Good, Port, PortId};

/// Countries committed when the API answered but no entry was valid.
pub fn empty_result_countries() -> Vec<Country> {
    vec![
        Country::new(1, "Indonesia", "ID"),
        Country::new(2, "Afghanistan", "AF"),
        Country::new(3, "Singapore", "SG"),
    ]
}

/// Countries committed when the countries request failed.
pub fn countries() -> Vec<Country> {
    let mut list = empty_result_countries();
    list.push(Country::new(4, "Malaysia", "MY"));
    list.push(Country::new(5, "Thailand", "TH"));
    list
}

pub fn ports(country_id: CountryId) -> Vec<Port> {
    [("1", "Tanjung Perak"), ("2", "Tanjung Priok")]
        .into_iter()
        .map(|(id, name)| Port {
            id: PortId::new(id),
            name: name.to_string(),
            country_id: Some(country_id.to_string()),
        })
        .collect()
}

pub fn goods(port_id: &PortId) -> Vec<Good> {
    vec![Good {
        id: 1,
        name: "BAJU".to_string(),
        port_id: Some(port_id.to_string()),
        price: 152000.0,
        description: Some("Merk Camp Wolver bahan tebal casual".to_string()),
        discount_percent: Some(5.0),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_entries_are_valid() {
        assert!(countries().iter().all(Country::is_valid));
        assert!(empty_result_countries().iter().all(Country::is_valid));
        assert!(ports(1).iter().all(Port::is_valid));
        assert!(goods(&PortId::new("1")).iter().all(Good::is_valid));
    }

    #[test]
    fn fallback_children_point_at_their_parent() {
        assert!(ports(7).iter().all(|p| p.country_id.as_deref() == Some("7")));
        let goods = goods(&PortId::new("2"));
        assert_eq!(goods[0].port_id.as_deref(), Some("2"));
    }
}
