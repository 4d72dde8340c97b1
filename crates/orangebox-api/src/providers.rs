// Provider endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::query::ListParams;
use crate::types::{DataEnvelope, ListEnvelope, ProviderPayload, ProviderRecord};

impl ApiClient {
    /// List one page of providers.
    pub async fn list_providers(
        &self,
        params: &ListParams,
    ) -> Result<ListEnvelope<ProviderRecord>, Error> {
        self.get_with_params("providers", &params.to_query()).await
    }

    /// Every provider in one unpaginated request (`per_page=-1`).
    ///
    /// Feeds the provider picker on the product form.
    pub async fn list_all_providers(&self) -> Result<Vec<ProviderRecord>, Error> {
        let env = self.list_providers(&ListParams::all()).await?;
        debug!(count = env.data.len(), "loaded provider options");
        Ok(env.data)
    }

    pub async fn get_provider(&self, id: i64) -> Result<ProviderRecord, Error> {
        let env: DataEnvelope<ProviderRecord> = self.get(&format!("providers/{id}")).await?;
        Ok(env.data)
    }

    pub async fn create_provider(&self, body: &ProviderPayload) -> Result<ProviderRecord, Error> {
        debug!(name = %body.name, "creating provider");
        let env: DataEnvelope<ProviderRecord> = self.post("providers", body).await?;
        Ok(env.data)
    }

    pub async fn update_provider(
        &self,
        id: i64,
        body: &ProviderPayload,
    ) -> Result<ProviderRecord, Error> {
        debug!(id, "updating provider");
        let env: DataEnvelope<ProviderRecord> =
            self.put(&format!("providers/{id}"), body).await?;
        Ok(env.data)
    }

    pub async fn delete_provider(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting provider");
        self.delete(&format!("providers/{id}")).await
    }
}
