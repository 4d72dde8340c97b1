// ── Product domain types ──

use serde::{Deserialize, Serialize};

use super::draft::{Draft, coerce_decimal, coerce_integer, unknown_field};
use super::{Entity, EntityId};
use crate::error::CoreError;

/// A product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    /// Read-only: joined in by the backend on list responses.
    pub provider_name: Option<String>,
    pub provider_id: Option<EntityId>,
}

impl Entity for Product {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Editable product fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock: i64,
    pub provider_id: i64,
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            id: Some(p.id),
            name: p.name.clone(),
            price: p.price,
            description: p.description.clone(),
            stock: p.stock,
            provider_id: p.provider_id.map_or(0, EntityId::get),
        }
    }
}

impl Draft for ProductDraft {
    const FIELDS: &'static [&'static str] = &["name", "price", "description", "stock", "provider_id"];
    const NEEDS_PROVIDER_OPTIONS: bool = true;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "name" => self.name = value.to_owned(),
            "price" => self.price = coerce_decimal(value),
            "description" => self.description = value.to_owned(),
            "stock" => self.stock = coerce_integer(value),
            "provider_id" => self.provider_id = coerce_integer(value),
            other => return Err(unknown_field("product", other)),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "price" => Some(self.price.to_string()),
            "description" => Some(self.description.clone()),
            "stock" => Some(self.stock.to_string()),
            "provider_id" => Some(self.provider_id.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_field_coerces_numbers() {
        let mut draft = ProductDraft::default();
        draft.set_field("name", "Anvil").unwrap();
        draft.set_field("price", "19.99").unwrap();
        draft.set_field("stock", "lots").unwrap();
        draft.set_field("provider_id", "3").unwrap();

        assert_eq!(draft.name, "Anvil");
        assert!((draft.price - 19.99).abs() < f64::EPSILON);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.provider_id, 3);
        assert_eq!(draft.id(), None);
    }

    #[test]
    fn set_field_rejects_unknown_names() {
        let mut draft = ProductDraft::default();
        let err = draft.set_field("colour", "red").unwrap_err();
        assert_eq!(err.to_string(), "Unknown product field: colour");
        assert_eq!(draft, ProductDraft::default());
    }

    #[test]
    fn draft_from_product_keeps_id() {
        let product = Product {
            id: EntityId::new(9),
            name: "Crate".into(),
            price: 12.0,
            stock: 4,
            description: "pine".into(),
            provider_name: Some("Acme".into()),
            provider_id: Some(EntityId::new(2)),
        };
        let draft = ProductDraft::from(&product);
        assert_eq!(draft.id(), Some(EntityId::new(9)));
        assert_eq!(draft.provider_id, 2);
        assert_eq!(draft.field("stock").as_deref(), Some("4"));
        assert_eq!(draft.field("provider_name"), None);
    }
}
