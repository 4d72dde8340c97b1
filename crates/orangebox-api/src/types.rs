// Wire types for the Orange Box REST API.
//
// List endpoints answer `{ data: [...], pagination: {...} }`; single-entity
// endpoints (show, store, update) answer `{ data: {...} }`.

use serde::{Deserialize, Deserializer, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// Paginated list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PaginationRecord>,
}

/// Single-entity response.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Pagination metadata. `from`/`to` are null when the page is empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaginationRecord {
    #[serde(deserialize_with = "int_or_string")]
    pub per_page: i64,
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
    #[serde(deserialize_with = "int_or_string")]
    pub total: i64,
    #[serde(default)]
    pub links: PaginationLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaginationLinks {
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "float_or_string")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "int_or_string")]
    pub stock: i64,
    #[serde(default)]
    pub provider_id: Option<i64>,
    /// Denormalized provider name, present on list responses.
    #[serde(default)]
    pub provider_name: Option<String>,
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock: i64,
    pub provider_id: i64,
}

// ── Providers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw backend timestamps; `orangebox-core` parses them.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /providers` and `PUT /providers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderPayload {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: String,
}

// ── Lenient numerics ─────────────────────────────────────────────────
//
// Decimal and integer columns sometimes arrive JSON-encoded as strings,
// and nullable columns as `null`, which decodes to 0.

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

fn float_or_string<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    match Option::<NumOrString>::deserialize(de)? {
        None => Ok(0.0),
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        Some(NumOrString::Int(i)) => Ok(i as f64),
        Some(NumOrString::Float(f)) => Ok(f),
        Some(NumOrString::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn int_or_string<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    match Option::<NumOrString>::deserialize(de)? {
        None => Ok(0),
        Some(NumOrString::Int(i)) => Ok(i),
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        Some(NumOrString::Float(f)) => Ok(f as i64),
        Some(NumOrString::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn product_price_accepts_decimal_string() {
        let json = r#"{"id":3,"name":"Lamp","price":"12.50","description":"desk",
                       "stock":"4","provider_id":1,"provider_name":"Acme"}"#;
        let p: ProductRecord = serde_json::from_str(json).unwrap();
        assert!((p.price - 12.5).abs() < f64::EPSILON);
        assert_eq!(p.stock, 4);
        assert_eq!(p.provider_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn null_numbers_decode_to_zero_without_dropping_the_page() {
        let json = r#"{"data":[
            {"id":3,"name":"Lamp","price":null,"stock":null,"provider_id":1},
            {"id":4,"name":"Vise","price":"8.00","stock":2,"provider_id":1}
        ],"pagination":{"per_page":5,"from":1,"to":2,"total":2}}"#;
        let page: ListEnvelope<ProductRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert!(page.data[0].price.abs() < f64::EPSILON);
        assert_eq!(page.data[0].stock, 0);
        assert_eq!(page.data[1].stock, 2);
    }

    #[test]
    fn empty_page_has_null_bounds() {
        let json = r#"{"data":[],"pagination":{"per_page":5,"from":null,"to":null,"total":0,
                       "links":{"next_page_url":null,"prev_page_url":null}}}"#;
        let page: ListEnvelope<ProviderRecord> = serde_json::from_str(json).unwrap();
        let pagination = page.pagination.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(pagination.from, None);
        assert_eq!(pagination.total, 0);
        assert_eq!(pagination.links, PaginationLinks::default());
    }

    #[test]
    fn provider_optional_fields_default() {
        let p: ProviderRecord = serde_json::from_str(r#"{"id":1,"name":"Acme"}"#).unwrap();
        assert_eq!(p.address, None);
        assert_eq!(p.phone, None);
    }
}
