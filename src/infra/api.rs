//! Thin asynchronous client for the port catalog API.
//!
//! - Three read-only endpoints: countries, ports by country, goods by port.
//! - Every response is wrapped in `{ status, data, message }`; anything but
//!   `status == "success"` with a list in `data` is an error.
//! - List entries are decoded one by one; entries that do not decode are
//!   dropped instead of failing the whole response.

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Country, CountryId, Good, Port, PortId};
use crate::infra::config::AppConfig;

const USER_AGENT: &str = "port-cargo-form/0.1.0";
const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Decoded entries of one response plus how many were unreadable.
#[derive(Clone, Debug, PartialEq)]
pub struct Entries<T> {
    pub items: Vec<T>,
    pub undecodable: usize,
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn with_base_url(base: &str) -> Result<Self, ApiClientError> {
        let config = AppConfig {
            api_base_url: crate::infra::config::parse_base_url(base)?,
            ..AppConfig::default()
        };
        Self::new(&config)
    }

    /// `GET /negaras`
    pub async fn get_countries(&self) -> Result<Entries<Country>, ApiClientError> {
        let url = self.url("negaras")?;
        info!(%url, "fetching countries");
        let entries = self.fetch_entries::<CountryDto>(url).await?;
        Ok(entries.map(Country::from))
    }

    /// `GET /pelabuhans?id_negara=<country_id>`
    pub async fn get_ports(&self, country_id: CountryId) -> Result<Entries<Port>, ApiClientError> {
        let mut url = self.url("pelabuhans")?;
        url.query_pairs_mut()
            .append_pair("id_negara", &country_id.to_string());
        info!(%url, "fetching ports");
        let entries = self.fetch_entries::<PortDto>(url).await?;
        Ok(entries.map(Port::from))
    }

    /// `GET /barangs?id_pelabuhan=<port_id>`
    pub async fn get_goods(&self, port_id: &PortId) -> Result<Entries<Good>, ApiClientError> {
        let mut url = self.url("barangs")?;
        url.query_pairs_mut()
            .append_pair("id_pelabuhan", port_id.as_str());
        info!(%url, "fetching goods");
        let entries = self.fetch_entries::<GoodDto>(url).await?;
        Ok(entries.map(Good::from))
    }

    async fn fetch_entries<T>(&self, url: Url) -> Result<Entries<T>, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let envelope: ApiEnvelope = response.json().await?;
        let ApiEnvelope {
            status,
            data,
            message,
        } = envelope;

        if status != SUCCESS_STATUS {
            return Err(ApiClientError::Api(message.unwrap_or(status)));
        }

        let Some(serde_json::Value::Array(raw)) = data else {
            return Err(ApiClientError::Api(
                message.unwrap_or_else(|| "invalid response format".to_string()),
            ));
        };

        let total = raw.len();
        let items: Vec<T> = raw
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<T>(entry).ok())
            .collect();
        let undecodable = total - items.len();
        debug!(total, undecodable, "decoded response entries");
        Ok(Entries { items, undecodable })
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

impl<T> Entries<T> {
    fn map<U>(self, f: impl FnMut(T) -> U) -> Entries<U> {
        Entries {
            items: self.items.into_iter().map(f).collect(),
            undecodable: self.undecodable,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountryDto {
    #[serde(default, deserialize_with = "lenient_id")]
    id_negara: Option<String>,
    #[serde(default)]
    nama_negara: Option<String>,
    #[serde(default)]
    kode_negara: Option<String>,
}

impl From<CountryDto> for Country {
    fn from(dto: CountryDto) -> Self {
        Self {
            id: dto
                .id_negara
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            name: dto.nama_negara.unwrap_or_default(),
            code: dto.kode_negara.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PortDto {
    #[serde(default, deserialize_with = "lenient_id")]
    id_pelabuhan: Option<String>,
    #[serde(default)]
    nama_pelabuhan: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    id_negara: Option<String>,
}

impl From<PortDto> for Port {
    fn from(dto: PortDto) -> Self {
        Self {
            id: PortId::new(dto.id_pelabuhan.unwrap_or_default()),
            name: dto.nama_pelabuhan.unwrap_or_default(),
            country_id: dto.id_negara,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoodDto {
    #[serde(default, deserialize_with = "lenient_id")]
    id_barang: Option<String>,
    #[serde(default)]
    nama_barang: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    id_pelabuhan: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    harga: Option<f64>,
    #[serde(default, deserialize_with = "optional_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    diskon: Option<f64>,
}

impl From<GoodDto> for Good {
    fn from(dto: GoodDto) -> Self {
        Self {
            id: dto
                .id_barang
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            name: dto.nama_barang.unwrap_or_default(),
            port_id: dto.id_pelabuhan,
            price: dto.harga.unwrap_or_default(),
            description: dto.description,
            discount_percent: dto.diskon,
        }
    }
}

// Optional fields: a value of the wrong shape reads as absent instead of
// rejecting the whole entry.

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_id(raw).ok().flatten())
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(raw).ok().flatten())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Accepts an identifier sent as a string, an integer, or null.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> serde::de::Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.trim().to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.fract() == 0.0 && value.is_finite() {
                Ok(Some(format!("{}", value as i64)))
            } else {
                Err(E::custom(format!("non-integer identifier {value}")))
            }
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Accepts a number sent as a JSON number, a numeric string, or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct NumberVisitor;

    impl<'de> serde::de::Visitor<'de> for NumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("not a number: {value}")))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::with_base_url(&format!("{}/api/v1", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn countries_decode_from_wire_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/negaras"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [
                    { "id_negara": 1, "nama_negara": "Indonesia", "kode_negara": "ID" },
                    { "id_negara": "3", "nama_negara": "Singapore", "kode_negara": "SG" },
                    null,
                    "garbage"
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server).await.get_countries().await.unwrap();
        assert_eq!(
            entries.items,
            vec![
                Country::new(1, "Indonesia", "ID"),
                Country::new(3, "Singapore", "SG"),
            ]
        );
        assert_eq!(entries.undecodable, 2);
    }

    #[tokio::test]
    async fn ports_are_filtered_by_country_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pelabuhans"))
            .and(query_param("id_negara", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [
                    { "id_pelabuhan": 10, "nama_pelabuhan": "Tanjung Perak", "id_negara": "1" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = client_for(&server).await.get_ports(1).await.unwrap();
        assert_eq!(entries.items.len(), 1);
        assert_eq!(entries.items[0].id, PortId::new("10"));
        assert_eq!(entries.items[0].country_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn goods_accept_numeric_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/barangs"))
            .and(query_param("id_pelabuhan", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [
                    { "id_barang": 1, "nama_barang": "BAJU", "id_pelabuhan": 10,
                      "harga": "152000", "diskon": 5, "description": null }
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server)
            .await
            .get_goods(&PortId::new("10"))
            .await
            .unwrap();
        let good = &entries.items[0];
        assert_eq!(good.id, 1);
        assert_eq!(good.price, 152000.0);
        assert_eq!(good.discount_percent, Some(5.0));
        assert_eq!(good.description, None);
    }

    #[tokio::test]
    async fn mistyped_optional_fields_keep_the_good() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/barangs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [
                    { "id_barang": 1, "nama_barang": "BAJU", "harga": 152000, "diskon": "n/a" },
                    { "id_barang": 2, "nama_barang": "SEPATU", "harga": 90000, "description": 42 },
                    { "id_barang": 3, "nama_barang": "TAS", "harga": 75000, "id_pelabuhan": 1.5 }
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server)
            .await
            .get_goods(&PortId::new("10"))
            .await
            .unwrap();
        assert_eq!(entries.undecodable, 0);
        assert_eq!(entries.items.len(), 3);
        assert_eq!(entries.items[0].discount_percent, None);
        assert_eq!(entries.items[0].display_discount(), "0");
        assert_eq!(entries.items[1].description, None);
        assert_eq!(entries.items[1].display_description(), "SEPATU");
        assert_eq!(entries.items[2].port_id, None);
    }

    #[tokio::test]
    async fn mistyped_port_country_keeps_the_port() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pelabuhans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": [
                    { "id_pelabuhan": 10, "nama_pelabuhan": "Tanjung Perak", "id_negara": [1] }
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server).await.get_ports(1).await.unwrap();
        assert_eq!(entries.undecodable, 0);
        assert_eq!(entries.items[0].name, "Tanjung Perak");
        assert_eq!(entries.items[0].country_id, None);
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "database offline"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_countries().await.unwrap_err();
        assert!(matches!(err, ApiClientError::Api(ref msg) if msg == "database offline"));
    }

    #[tokio::test]
    async fn data_must_be_a_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "id_negara": 1 }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_countries().await.unwrap_err();
        assert!(matches!(err, ApiClientError::Api(_)));
    }

    #[tokio::test]
    async fn http_errors_and_bad_json_are_transport_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/negaras"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pelabuhans"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.get_countries().await,
            Err(ApiClientError::Http(_))
        ));
        assert!(matches!(client.get_ports(1).await, Err(ApiClientError::Http(_))));
    }
}
