// ── Resource abstraction ──
//
// Products and providers share one list/form workflow. This trait binds
// each domain type to its draft, sortable columns, store slice and
// REST endpoints so the controllers can be written once.

use std::fmt::Debug;
use std::future::Future;

use orangebox_api::{ApiClient, ListParams, ProductPayload, ProviderPayload};
use serde::Serialize;

use crate::convert::page_from_envelope;
use crate::error::CoreError;
use crate::model::{
    Draft, Entity, EntityId, Page, Product, ProductDraft, Provider, ProviderDraft,
};
use crate::query::{ProductSortField, ProviderSortField, SortField};
use crate::store::{AppState, ResourceStore};

pub trait Resource: Entity + Clone + Debug + Serialize + Send + Sync + 'static {
    type Draft: Draft + for<'a> From<&'a Self>;
    type SortField: SortField;

    /// Display name, capitalized ("Product").
    const SINGULAR: &'static str;
    /// Collection name, lowercase ("products").
    const PLURAL: &'static str;

    /// This resource's slice of the application state.
    fn store(state: &AppState) -> &ResourceStore<Self>;

    fn list(
        client: &ApiClient,
        params: &ListParams,
    ) -> impl Future<Output = Result<Page<Self>, CoreError>> + Send;

    fn fetch_one(
        client: &ApiClient,
        id: EntityId,
    ) -> impl Future<Output = Result<Self, CoreError>> + Send;

    fn create(
        client: &ApiClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self, CoreError>> + Send;

    fn update(
        client: &ApiClient,
        id: EntityId,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self, CoreError>> + Send;

    fn delete(
        client: &ApiClient,
        id: EntityId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Lowercase singular ("product"), for prompts and log fields.
    fn noun() -> String {
        Self::SINGULAR.to_lowercase()
    }
}

impl Resource for Product {
    type Draft = ProductDraft;
    type SortField = ProductSortField;

    const SINGULAR: &'static str = "Product";
    const PLURAL: &'static str = "products";

    fn store(state: &AppState) -> &ResourceStore<Self> {
        &state.products
    }

    async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Self>, CoreError> {
        let env = client.list_products(params).await?;
        Ok(page_from_envelope(env))
    }

    async fn fetch_one(client: &ApiClient, id: EntityId) -> Result<Self, CoreError> {
        client
            .get_product(id.get())
            .await
            .map(Self::from)
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }

    async fn create(client: &ApiClient, draft: &ProductDraft) -> Result<Self, CoreError> {
        let record = client.create_product(&ProductPayload::from(draft)).await?;
        Ok(record.into())
    }

    async fn update(
        client: &ApiClient,
        id: EntityId,
        draft: &ProductDraft,
    ) -> Result<Self, CoreError> {
        client
            .update_product(id.get(), &ProductPayload::from(draft))
            .await
            .map(Self::from)
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }

    async fn delete(client: &ApiClient, id: EntityId) -> Result<(), CoreError> {
        client
            .delete_product(id.get())
            .await
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }
}

impl Resource for Provider {
    type Draft = ProviderDraft;
    type SortField = ProviderSortField;

    const SINGULAR: &'static str = "Provider";
    const PLURAL: &'static str = "providers";

    fn store(state: &AppState) -> &ResourceStore<Self> {
        &state.providers
    }

    async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Self>, CoreError> {
        let env = client.list_providers(params).await?;
        Ok(page_from_envelope(env))
    }

    async fn fetch_one(client: &ApiClient, id: EntityId) -> Result<Self, CoreError> {
        client
            .get_provider(id.get())
            .await
            .map(Self::from)
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }

    async fn create(client: &ApiClient, draft: &ProviderDraft) -> Result<Self, CoreError> {
        let record = client.create_provider(&ProviderPayload::from(draft)).await?;
        Ok(record.into())
    }

    async fn update(
        client: &ApiClient,
        id: EntityId,
        draft: &ProviderDraft,
    ) -> Result<Self, CoreError> {
        client
            .update_provider(id.get(), &ProviderPayload::from(draft))
            .await
            .map(Self::from)
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }

    async fn delete(client: &ApiClient, id: EntityId) -> Result<(), CoreError> {
        client
            .delete_provider(id.get())
            .await
            .map_err(|e| CoreError::from(e).for_entity(Self::SINGULAR, id))
    }
}
