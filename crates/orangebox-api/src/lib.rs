// orangebox-api: Async Rust client for the Orange Box inventory REST API

pub mod client;
pub mod error;
pub mod products;
pub mod providers;
pub mod query;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use query::ListParams;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    DataEnvelope, ListEnvelope, PaginationLinks, PaginationRecord, ProductPayload, ProductRecord,
    ProviderPayload, ProviderRecord,
};
