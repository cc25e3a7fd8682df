use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{ApiRequest, ChannelType, DataResponse, NovuClient, Result};

/// Provider credentials. Only the fields a provider needs are set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_options: Option<Map<String, JsonValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationRequest {
    pub provider_id: String,
    pub channel: ChannelType,
    pub credentials: IntegrationCredentials,
    pub active: bool,
    pub check: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrationRequest {
    pub credentials: IntegrationCredentials,
    pub active: bool,
    pub check: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Integration {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    pub provider_id: String,
    pub channel: Option<ChannelType>,
    pub credentials: IntegrationCredentials,
    pub active: bool,
    pub deleted: bool,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
    pub deleted_by: Option<String>,
}

pub type IntegrationResponse = DataResponse<Integration>;
pub type IntegrationList = DataResponse<Vec<Integration>>;

/// Delivery provider configuration.
#[allow(async_fn_in_trait)]
pub trait IntegrationsApi {
    /// Creates an integration; requires `201 Created`.
    async fn create(&self, request: &CreateIntegrationRequest) -> Result<IntegrationResponse>;
    async fn list(&self) -> Result<IntegrationList>;
    async fn list_active(&self) -> Result<IntegrationList>;
    async fn update(
        &self,
        integration_id: &str,
        request: &UpdateIntegrationRequest,
    ) -> Result<IntegrationResponse>;
    async fn delete(&self, integration_id: &str) -> Result<IntegrationList>;
}

#[derive(Clone, Copy, Debug)]
pub struct IntegrationService<'a> {
    client: &'a NovuClient,
}

impl<'a> IntegrationService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl IntegrationsApi for IntegrationService<'_> {
    async fn create(&self, request: &CreateIntegrationRequest) -> Result<IntegrationResponse> {
        let request = ApiRequest::post(["integrations"]).json(request)?;
        let response = self
            .client
            .send(request)
            .await?
            .require_status(StatusCode::CREATED)?;
        Ok(response.data)
    }

    async fn list(&self) -> Result<IntegrationList> {
        Ok(self.client.send(ApiRequest::get(["integrations"])).await?.data)
    }

    async fn list_active(&self) -> Result<IntegrationList> {
        let request = ApiRequest::get(["integrations", "active"]);
        Ok(self.client.send(request).await?.data)
    }

    async fn update(
        &self,
        integration_id: &str,
        request: &UpdateIntegrationRequest,
    ) -> Result<IntegrationResponse> {
        let request = ApiRequest::put(["integrations", integration_id]).json(request)?;
        Ok(self.client.send(request).await?.data)
    }

    async fn delete(&self, integration_id: &str) -> Result<IntegrationList> {
        let request = ApiRequest::delete(["integrations", integration_id]);
        Ok(self.client.send(request).await?.data)
    }
}
