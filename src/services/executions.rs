use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::{ApiRequest, DataResponse, NovuClient, Result};

/// Filters for [`ExecutionsApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionsQuery {
    pub notification_id: Option<String>,
    pub subscriber_id: Option<String>,
}

/// One step of a workflow run, as logged by the engine.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_jobId")]
    pub job_id: String,
    #[serde(rename = "_notificationId")]
    pub notification_id: String,
    #[serde(rename = "_subscriberId")]
    pub subscriber_id: String,
    pub provider_id: Option<String>,
    pub transaction_id: String,
    pub channel: Option<String>,
    pub detail: String,
    pub source: String,
    pub status: String,
    pub is_test: bool,
    pub is_retry: bool,
    pub raw: Option<JsonValue>,
    pub created_at: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait ExecutionsApi {
    async fn list(&self, query: &ExecutionsQuery) -> Result<DataResponse<Vec<ExecutionDetail>>>;
}

#[derive(Clone, Copy, Debug)]
pub struct ExecutionService<'a> {
    client: &'a NovuClient,
}

impl<'a> ExecutionService<'a> {
    pub(crate) fn new(client: &'a NovuClient) -> Self {
        Self { client }
    }
}

impl ExecutionsApi for ExecutionService<'_> {
    async fn list(&self, query: &ExecutionsQuery) -> Result<DataResponse<Vec<ExecutionDetail>>> {
        let request = ApiRequest::get(["execution-details"])
            .query_opt("notificationId", query.notification_id.as_deref())
            .query_opt("subscriberId", query.subscriber_id.as_deref());
        Ok(self.client.send(request).await?.data)
    }
}
