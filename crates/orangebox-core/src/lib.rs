// orangebox-core: Domain model, stores and controllers between orangebox-api and the front-ends (CLI/TUI).

pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod list;
pub mod model;
pub mod prompt;
pub mod query;
pub mod resource;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use form::{FormController, FormStatus, SubmitOutcome, SubmitRequest, load_provider_options};
pub use list::{
    DeleteOutcome, DeleteRequest, FetchOutcome, FetchRequest, ListController, LoadState,
    PromptState,
};
pub use prompt::{ConfirmationPrompt, PromptChoice};
pub use query::{
    PageSize, ProductSortField, ProviderSortField, QueryState, SortDirection, SortField,
};
pub use resource::Resource;
pub use store::{AppState, ResourceStore, Slice};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Draft, Entity, EntityId, Page, PageInfo, Product, ProductDraft, Provider, ProviderDraft,
    ProviderOption, field_label,
};

// The API client is part of the controller signatures.
pub use orangebox_api::ApiClient;
