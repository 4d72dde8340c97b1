// ── Domain model ──
//
// Canonical types the CLI and TUI render. Wire types from orangebox-api
// are converted into these in `crate::convert`.

pub mod draft;
pub mod entity_id;
pub mod page;
pub mod product;
pub mod provider;

pub use draft::{Draft, field_label};
pub use entity_id::{Entity, EntityId};
pub use page::{Page, PageInfo};
pub use product::{Product, ProductDraft};
pub use provider::{Provider, ProviderDraft, ProviderOption};
