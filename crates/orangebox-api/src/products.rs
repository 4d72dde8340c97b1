// Product endpoints
//
// CRUD over `/products`. List responses carry the provider's name
// alongside `provider_id`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::query::ListParams;
use crate::types::{DataEnvelope, ListEnvelope, ProductPayload, ProductRecord};

impl ApiClient {
    /// List one page of products.
    ///
    /// `GET /products?page=&per_page=&sort=&direction=&search=`
    pub async fn list_products(
        &self,
        params: &ListParams,
    ) -> Result<ListEnvelope<ProductRecord>, Error> {
        self.get_with_params("products", &params.to_query()).await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, id: i64) -> Result<ProductRecord, Error> {
        let env: DataEnvelope<ProductRecord> = self.get(&format!("products/{id}")).await?;
        Ok(env.data)
    }

    /// `POST /products`
    pub async fn create_product(&self, body: &ProductPayload) -> Result<ProductRecord, Error> {
        debug!(name = %body.name, "creating product");
        let env: DataEnvelope<ProductRecord> = self.post("products", body).await?;
        Ok(env.data)
    }

    /// `PUT /products/{id}`
    pub async fn update_product(
        &self,
        id: i64,
        body: &ProductPayload,
    ) -> Result<ProductRecord, Error> {
        debug!(id, "updating product");
        let env: DataEnvelope<ProductRecord> = self.put(&format!("products/{id}"), body).await?;
        Ok(env.data)
    }

    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting product");
        self.delete(&format!("products/{id}")).await
    }
}
