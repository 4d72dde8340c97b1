// ── Provider domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::{Draft, unknown_field};
use super::{Entity, EntityId};
use crate::error::CoreError;

/// A supplier that products reference through `provider_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Provider {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Entry in the product form's provider picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOption {
    pub id: EntityId,
    pub name: String,
}

impl From<&Provider> for ProviderOption {
    fn from(p: &Provider) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
        }
    }
}

/// Editable provider fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: String,
}

impl From<&Provider> for ProviderDraft {
    fn from(p: &Provider) -> Self {
        Self {
            id: Some(p.id),
            name: p.name.clone(),
            address: p.address.clone(),
            phone: p.phone.clone(),
            description: p.description.clone(),
        }
    }
}

impl Draft for ProviderDraft {
    const FIELDS: &'static [&'static str] = &["name", "address", "phone", "description"];

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let slot = match name {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "phone" => &mut self.phone,
            "description" => &mut self.description,
            other => return Err(unknown_field("provider", other)),
        };
        value.clone_into(slot);
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "address" => Some(self.address.clone()),
            "phone" => Some(self.phone.clone()),
            "description" => Some(self.description.clone()),
            _ => None,
        }
    }
}
