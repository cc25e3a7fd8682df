use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{ApiRequest, DataResponse, NovuClient, Page, Result};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tenant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    pub identifier: String,
    pub name: String,
    pub data: Option<JsonValue>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub identifier: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

pub type TenantResponse = DataResponse<Tenant>;

#[allow(async_fn_in_trait)]
pub trait TenantsApi {
    async fn create(&self, request: &CreateTenantRequest) -> Result<TenantResponse>;
    async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Page<Tenant>>;
    async fn get(&self, identifier: &str) -> Result<TenantResponse>;
    async fn update(&self, identifier: &str, request: &UpdateTenantRequest) -> Result<TenantResponse>;
    async fn delete(&self, identifier: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug)]
pub struct TenantService<'a> {
    client: &'a NovuClient,
}

impl<'a> TenantService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl TenantsApi for TenantService<'_> {
    async fn create(&self, request: &CreateTenantRequest) -> Result<TenantResponse> {
        let request = ApiRequest::post(["tenants"]).json(request)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Page<Tenant>> {
        let request = ApiRequest::get(["tenants"])
            .query_opt("page", page)
            .query_opt("limit", limit);
        Ok(self.client.send(request).await?.data)
    }

    async fn get(&self, identifier: &str) -> Result<TenantResponse> {
        let request = ApiRequest::get(["tenants", identifier]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update(&self, identifier: &str, request: &UpdateTenantRequest) -> Result<TenantResponse> {
        let request = ApiRequest::patch(["tenants", identifier]).json(request)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, identifier: &str) -> Result<()> {
        let request = ApiRequest::delete(["tenants", identifier]);
        self.client.send::<JsonValue>(request).await?;
        Ok(())
    }
}
